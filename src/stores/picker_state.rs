//! Popup state machine
//!
//! One `PickerState` exists per page, next to the single popup element. It knows
//! nothing about the DOM: the registry feeds it events and applies the returned
//! transitions to the popup.

use crate::utils::category::CategoryId;
use crate::utils::search::SearchMode;
use crate::utils::waypoints::Waypoints;

/// Id of a trigger element (`span.lcep-trigger`)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriggerId(pub String);

impl TriggerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Closed,
    Open(TriggerId),
}

/// What the DOM must do after an event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Reset the popup (search + scroll), position it under `trigger` and show it
    Opened { trigger: TriggerId },
    /// Hide the popup
    Closed,
    /// Nothing to do
    Unchanged,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PickerState {
    visibility: Visibility,
    active_category: Option<CategoryId>,
    first_category: Option<CategoryId>,
    search_query: String,
    waypoints: Waypoints,
}

impl PickerState {
    pub fn new(first_category: Option<CategoryId>, waypoints: Waypoints) -> Self {
        Self {
            visibility: Visibility::Closed,
            active_category: first_category.clone(),
            first_category,
            search_query: String::new(),
            waypoints,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.visibility, Visibility::Open(_))
    }

    pub fn active_trigger(&self) -> Option<&TriggerId> {
        match &self.visibility {
            Visibility::Open(trigger) => Some(trigger),
            Visibility::Closed => None,
        }
    }

    pub fn active_category(&self) -> Option<&CategoryId> {
        self.active_category.as_ref()
    }

    pub fn first_category(&self) -> Option<&CategoryId> {
        self.first_category.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Waypoints are measured after the popup is laid out
    pub fn set_waypoints(&mut self, waypoints: Waypoints) {
        self.waypoints = waypoints;
    }

    /// Trigger click: same trigger closes, any other (re)opens with a reset
    pub fn toggle(&mut self, trigger: &TriggerId) -> Transition {
        if self.active_trigger() == Some(trigger) {
            return self.close();
        }
        self.reset();
        self.visibility = Visibility::Open(trigger.clone());
        Transition::Opened {
            trigger: trigger.clone(),
        }
    }

    pub fn close(&mut self) -> Transition {
        match std::mem::take(&mut self.visibility) {
            Visibility::Open(_) => Transition::Closed,
            Visibility::Closed => Transition::Unchanged,
        }
    }

    /// Document click; clicks inside the popup or on a trigger are ignored
    pub fn handle_outside_click(&mut self, inside_popup: bool, inside_trigger: bool) -> Transition {
        if inside_popup || inside_trigger {
            return Transition::Unchanged;
        }
        self.close()
    }

    pub fn handle_resize(&mut self) -> Transition {
        self.close()
    }

    /// Drop the active trigger if it is `trigger` (element left the document)
    pub fn invalidate_trigger(&mut self, trigger: &TriggerId) -> Transition {
        if self.active_trigger() == Some(trigger) {
            self.close()
        } else {
            Transition::Unchanged
        }
    }

    /// Clear the search and go back to the first category
    pub fn reset(&mut self) {
        self.search_query.clear();
        self.active_category = self.first_category.clone();
    }

    /// Category tab click; returns the previously active category
    pub fn select_category(&mut self, id: CategoryId) -> Option<CategoryId> {
        self.active_category.replace(id)
    }

    /// Grid scroll; returns the category to highlight
    pub fn track_scroll(&mut self, scroll_top: i32) -> Option<&CategoryId> {
        let next = self.waypoints.active_at(scroll_top)?.clone();
        self.active_category = Some(next);
        self.active_category.as_ref()
    }

    pub fn set_search_query(&mut self, query: &str) -> SearchMode {
        self.search_query.clear();
        self.search_query.push_str(query);
        SearchMode::for_query(query)
    }
}
