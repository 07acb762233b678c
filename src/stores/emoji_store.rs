use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PickerError;
use crate::utils::category::CategoryId;

/// A single emoji from the dataset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiEntry {
    #[serde(rename = "emoji")]
    pub glyph: String,
    pub description: String,
    #[serde(default)]
    pub code: String,
}

impl EmojiEntry {
    /// Lowercased description matched by the search box
    pub fn search_label(&self) -> String {
        self.description.to_lowercase()
    }
}

/// A named group of emojis, in dataset order
#[derive(Clone, Debug, PartialEq)]
pub struct EmojiCategory {
    pub label: String,
    pub id: CategoryId,
    pub entries: Vec<EmojiEntry>,
}

/// The full emoji document: category label → entries, order preserved
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmojiDataset {
    categories: Vec<EmojiCategory>,
}

impl EmojiDataset {
    /// Parse the remote JSON document.
    ///
    /// The top level must be an object. Categories whose value is not a list of
    /// entries are skipped with a warning.
    pub fn from_json(body: &str) -> Result<Self, PickerError> {
        let value: Value = serde_json::from_str(body)?;
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(PickerError::Parse(format!(
                    "expected an object of categories, got {}",
                    json_kind(&other)
                )))
            }
        };
        Ok(Self::from_map(object))
    }

    fn from_map(object: Map<String, Value>) -> Self {
        let mut categories = Vec::with_capacity(object.len());
        for (label, value) in object {
            match serde_json::from_value::<Vec<EmojiEntry>>(value) {
                Ok(entries) => categories.push(EmojiCategory {
                    id: CategoryId::from_label(&label),
                    label,
                    entries,
                }),
                Err(e) => log::warn!("Skipping malformed emoji category {:?}: {}", label, e),
            }
        }
        Self { categories }
    }

    pub fn categories(&self) -> &[EmojiCategory] {
        &self.categories
    }

    pub fn first_category(&self) -> Option<&EmojiCategory> {
        self.categories.first()
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Entry at a flat position, counting through categories in order
    pub fn entry_at(&self, mut index: usize) -> Option<&EmojiEntry> {
        for category in &self.categories {
            if index < category.entries.len() {
                return category.entries.get(index);
            }
            index -= category.entries.len();
        }
        None
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Page-wide dataset load state
///
/// Moves forward only: `Pending` → `Loading` → `Loaded` / `Failed`. There is no
/// retry, so a failed load leaves every later picker inert.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetState<T> {
    /// No picker has asked for the dataset yet
    Pending,

    /// Request in flight
    Loading,

    /// Dataset available
    Loaded(T),

    /// Request or parse failed with error message
    Failed(String),
}

impl<T> Default for DatasetState<T> {
    fn default() -> Self {
        DatasetState::Pending
    }
}

impl<T> DatasetState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, DatasetState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            DatasetState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Short state name, reported to JS hosts
    pub fn status(&self) -> &'static str {
        match self {
            DatasetState::Pending => "pending",
            DatasetState::Loading => "loading",
            DatasetState::Loaded(_) => "loaded",
            DatasetState::Failed(_) => "failed",
        }
    }
}

impl<T> From<Result<T, PickerError>> for DatasetState<T> {
    fn from(result: Result<T, PickerError>) -> Self {
        match result {
            Ok(data) => DatasetState::Loaded(data),
            Err(e) => DatasetState::Failed(e.to_string()),
        }
    }
}
