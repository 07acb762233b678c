//! Scroll waypoints for the emoji grid
//!
//! Each category title contributes one waypoint: its offset inside the scroller minus
//! the header height. Sorted descending, the keys split the scrollable area into bands
//! and the band containing the current scroll offset names the active category.

use std::collections::BTreeMap;

use super::category::CategoryId;

/// Height of the category bar + search box above the grid
pub const HEADER_HEIGHT: i32 = 101;

/// Distance kept between a category's top and the scroller's top when jumping to it
pub const CATEGORY_SCROLL_ALLOWANCE: i32 = 90;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Waypoints {
    marks: BTreeMap<i32, CategoryId>,
}

impl Waypoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(title offsetTop, category)` pairs as measured in the rendered popup
    pub fn from_title_offsets<I>(titles: I) -> Self
    where
        I: IntoIterator<Item = (i32, CategoryId)>,
    {
        let mut waypoints = Self::new();
        for (offset_top, id) in titles {
            waypoints.insert(offset_top - HEADER_HEIGHT, id);
        }
        waypoints
    }

    /// Later inserts at the same offset replace earlier ones
    pub fn insert(&mut self, offset: i32, id: CategoryId) {
        self.marks.insert(offset, id);
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Category owning `scroll_top`: the greatest key not above it, or the smallest key
    /// when the offset sits above every waypoint.
    pub fn active_at(&self, scroll_top: i32) -> Option<&CategoryId> {
        self.marks
            .range(..=scroll_top)
            .next_back()
            .or_else(|| self.marks.iter().next())
            .map(|(_, id)| id)
    }
}

/// `scrollTop` that brings a category section into view
pub fn category_scroll_top(section_offset_top: i32) -> i32 {
    section_offset_top - CATEGORY_SCROLL_ALLOWANCE
}
