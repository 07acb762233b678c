//! DOM side of the popup controller
//!
//! `Popup` applies the decisions taken by `PickerState` to the rendered elements:
//! visibility and placement, the active tab, grid scrolling and search filtering.

use web_sys::{HtmlElement, Node};

use crate::components::markup::{PopupElements, ACTIVE_CLASS, SEARCHING_CLASS, SHOWN_CLASS};
use crate::error::PickerError;
use crate::utils::category::CategoryId;
use crate::utils::position::{popup_position, PopupPosition, TriggerGeometry};
use crate::utils::search::{filter_labels, SearchMode};
use crate::utils::waypoints::{category_scroll_top, Waypoints};

pub struct Popup {
    elements: PopupElements,
}

impl Popup {
    pub fn new(elements: PopupElements) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &PopupElements {
        &self.elements
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.elements.root.contains(Some(node))
    }

    /// Place under `trigger` and show
    pub fn show_below(&self, trigger: &HtmlElement) -> Result<PopupPosition, PickerError> {
        let window = crate::utils::dom::window()?;
        let rect = trigger.get_bounding_client_rect();
        let geometry = TriggerGeometry {
            rect_top: rect.y(),
            rect_right: rect.right(),
            client_height: trigger.client_height(),
            page_y_offset: window.page_y_offset()?,
        };
        let position = popup_position(&geometry, self.elements.root.offset_width());

        self.elements.root.set_attribute("style", &position.to_style())?;
        self.elements.root.class_list().add_1(SHOWN_CLASS)?;
        Ok(position)
    }

    pub fn hide(&self) -> Result<(), PickerError> {
        self.elements.root.class_list().remove_1(SHOWN_CLASS)?;
        Ok(())
    }

    /// Move the highlight to `id`'s tab
    pub fn activate_tab(&self, id: &CategoryId) -> Result<(), PickerError> {
        for (tab_id, li) in &self.elements.tabs {
            li.class_list().toggle_with_force(ACTIVE_CLASS, tab_id == id)?;
        }
        Ok(())
    }

    /// Scroll the grid so `id`'s section sits just below the header
    pub fn scroll_to_category(&self, id: &CategoryId) {
        match self.elements.section(id) {
            Some(section) => {
                let top = category_scroll_top(section.list.offset_top());
                self.elements.scroller.set_scroll_top(top.max(0));
            }
            None => log::warn!("Unknown emoji category {}", id),
        }
    }

    pub fn scroll_top(&self) -> i32 {
        self.elements.scroller.scroll_top()
    }

    /// Waypoints for the current layout
    pub fn measure_waypoints(&self) -> Waypoints {
        Waypoints::from_title_offsets(
            self.elements
                .sections
                .iter()
                .map(|section| (section.title.offset_top(), section.id.clone())),
        )
    }

    pub fn search_query(&self) -> String {
        self.elements.search_input.value()
    }

    /// Hide entries whose label lacks `query`, or show all for short queries
    pub fn apply_search(&self, query: &str) -> Result<SearchMode, PickerError> {
        let (mode, visible) = filter_labels(
            self.elements.items.iter().map(|item| item.name.as_str()),
            query,
        );
        for (item, show) in self.elements.items.iter().zip(visible) {
            item.element
                .style()
                .set_property("display", if show { "" } else { "none" })?;
        }
        self.elements
            .search_box
            .class_list()
            .toggle_with_force(SEARCHING_CLASS, mode.is_searching())?;
        Ok(mode)
    }

    pub fn clear_search(&self) -> Result<(), PickerError> {
        self.elements.search_input.set_value("");
        self.apply_search("")?;
        Ok(())
    }

    /// Empty search, first category scrolled into view and highlighted
    pub fn reset(&self, first: Option<&CategoryId>) -> Result<(), PickerError> {
        self.clear_search()?;
        if let Some(first) = first {
            self.scroll_to_category(first);
            self.activate_tab(first)?;
        }
        Ok(())
    }

    pub fn remove(&self) {
        self.elements.root.remove();
    }
}
