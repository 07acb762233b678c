use std::fmt;

/// DOM-addressable key for an emoji category
///
/// Derived from the category label: spaces become hyphens, `&` is dropped and the
/// result is lowercased, so "Smileys & People" becomes "smileys--people".
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn from_label(label: &str) -> Self {
        let id = label
            .split(' ')
            .collect::<Vec<_>>()
            .join("-")
            .replace('&', "")
            .to_lowercase();
        Self(id)
    }

    /// Wrap an id read back from a `data-index` / `category-name` attribute
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tab icon for the category, `None` for categories outside the known set
    pub fn icon(&self) -> Option<&'static str> {
        category_icon(&self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn category_icon(id: &str) -> Option<&'static str> {
    match id {
        "smileys--people" => Some("😀"),
        "animals--nature" => Some("🐇"),
        "travel--places" => Some("🚘"),
        "activities" => Some("⚽"),
        "objects" => Some("🎧"),
        "symbols" => Some("🈶"),
        "flags" => Some("🚩"),
        _ => None,
    }
}
