//! Popup placement relative to the active trigger

/// Gap between the trigger's bottom edge and the popup
pub const POPUP_GAP: i32 = 5;

/// Trigger measurements taken when the popup opens
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriggerGeometry {
    /// `getBoundingClientRect().y`
    pub rect_top: f64,
    /// `getBoundingClientRect().right`
    pub rect_right: f64,
    /// `clientHeight`
    pub client_height: i32,
    /// `window.pageYOffset`
    pub page_y_offset: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopupPosition {
    pub top: i32,
    pub left: i32,
}

impl PopupPosition {
    /// Inline style written on the popup root
    pub fn to_style(&self) -> String {
        format!("top: {}px; left: {}px;", self.top, self.left)
    }
}

/// Place the popup below the trigger, right-aligned with it.
///
/// Only the left edge is clamped. A trigger close to the right edge of a narrow
/// viewport can still push the popup past it.
pub fn popup_position(trigger: &TriggerGeometry, popup_width: i32) -> PopupPosition {
    let top = trigger.rect_top.trunc() as i32
        + trigger.page_y_offset.trunc() as i32
        + trigger.client_height
        + POPUP_GAP;
    let left = (trigger.rect_right.trunc() as i32 - popup_width).max(0);
    PopupPosition { top, left }
}
