//! Emoji search filtering
//!
//! Labels are lowercased when the markup is built; the typed query is used as-is, so
//! an uppercase query never matches.

/// Queries shorter than this show every entry
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// All entries visible, magnifier icon shown
    Browsing,
    /// Filter applied, clear icon shown
    Searching,
}

impl SearchMode {
    pub fn for_query(query: &str) -> Self {
        if query.chars().count() < MIN_QUERY_CHARS {
            SearchMode::Browsing
        } else {
            SearchMode::Searching
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, SearchMode::Searching)
    }
}

/// Whether an entry with `label` stays visible for `query`
pub fn is_visible(label: &str, query: &str) -> bool {
    match SearchMode::for_query(query) {
        SearchMode::Browsing => true,
        SearchMode::Searching => label.contains(query),
    }
}

/// Visibility flags for every label, in order
pub fn filter_labels<'a, I>(labels: I, query: &str) -> (SearchMode, Vec<bool>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mode = SearchMode::for_query(query);
    let visible = labels
        .into_iter()
        .map(|label| is_visible(label, query))
        .collect();
    (mode, visible)
}
