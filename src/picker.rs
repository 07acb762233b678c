//! Public picker handle, for Rust callers and for JavaScript
//!
//! ```ignore
//! let picker = EmojiPicker::attach(
//!     "textarea.comment",
//!     PickerOptions::default().on_select(|emoji, _field| {
//!         log::info!("picked {}", emoji.glyph);
//!     }),
//! )?;
//! ```
//!
//! From JavaScript:
//!
//! ```js
//! new EmojiPicker('input[name="title"]', { targetRightPadding: 30 });
//! ```

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::components::style::inject_style;
use crate::error::PickerError;
use crate::options::PickerOptions;
use crate::stores::emoji_store::EmojiDataset;
use crate::stores::picker_registry::{self, PickerInstance};
use crate::utils::dom;

#[wasm_bindgen]
pub struct EmojiPicker {
    instance: Option<Rc<PickerInstance>>,
}

impl EmojiPicker {
    /// Attach a picker to every `<textarea>` / `<input type="text">` matching
    /// `selector`, now or once the emoji dataset has loaded.
    pub fn attach(selector: &str, options: PickerOptions) -> Result<Self, PickerError> {
        if selector.trim().is_empty() {
            return Err(PickerError::MissingTarget);
        }

        let document = dom::document()?;
        inject_style(&document)?;

        let instance = Rc::new(PickerInstance {
            selector: selector.to_string(),
            options,
        });
        picker_registry::request(instance.clone())?;
        Ok(Self {
            instance: Some(instance),
        })
    }

    /// A picker that does nothing, returned to JS when construction fails
    fn inert() -> Self {
        Self { instance: None }
    }

    pub fn options(&self) -> Option<&PickerOptions> {
        self.instance.as_ref().map(|i| &i.options)
    }
}

#[wasm_bindgen]
impl EmojiPicker {
    /// `new EmojiPicker(selector, options)`. Never throws; errors go to the console.
    #[wasm_bindgen(constructor)]
    pub fn new(selector: JsValue, options: JsValue) -> EmojiPicker {
        crate::init_logging();

        let selector = match selector.as_string() {
            Some(selector) if !selector.trim().is_empty() => selector,
            _ => {
                log::error!("{}", PickerError::MissingTarget);
                return Self::inert();
            }
        };
        let options = match PickerOptions::from_js(&options) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{}", e);
                return Self::inert();
            }
        };

        match Self::attach(&selector, options) {
            Ok(picker) => picker,
            Err(e) => {
                log::error!("{}", e);
                Self::inert()
            }
        }
    }

    #[wasm_bindgen(getter)]
    pub fn selector(&self) -> Option<String> {
        self.instance.as_ref().map(|i| i.selector.clone())
    }

    /// Whether construction succeeded
    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.instance.is_some()
    }
}

/// Seed the page-wide dataset so no request is made
pub fn provide_dataset(dataset: EmojiDataset) -> bool {
    picker_registry::provide_dataset(dataset)
}

#[wasm_bindgen(js_name = provideEmojiDataset)]
pub fn provide_dataset_json(json: &str) -> Result<bool, JsValue> {
    let dataset = EmojiDataset::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(provide_dataset(dataset))
}

/// Remove every picker from the page and reset shared state
#[wasm_bindgen(js_name = teardownEmojiPickers)]
pub fn teardown() {
    picker_registry::teardown();
    if let Ok(document) = dom::document() {
        crate::components::style::remove_style(&document);
    }
}

#[wasm_bindgen(js_name = isEmojiPickerOpen)]
pub fn is_open() -> bool {
    picker_registry::is_open()
}

/// Emoji dataset load state: `pending`, `loading`, `loaded` or `failed`
#[wasm_bindgen(js_name = emojiDatasetStatus)]
pub fn dataset_status() -> String {
    picker_registry::dataset_status().to_string()
}
