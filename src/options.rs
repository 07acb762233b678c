//! Per-picker configuration

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::{Map, Value};
use wasm_bindgen::{JsCast, JsValue};

use crate::components::field_wrapper::TargetField;
use crate::error::PickerError;
use crate::stores::emoji_store::EmojiEntry;

pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/LCweb-ita/LC-emoji-picker/master/emoji-list.min.json";

pub const DEFAULT_TARGET_RIGHT_PADDING: u32 = 27;

pub const DEFAULT_TRIGGER_MARKUP: &str = r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" x="0px" y="0px" viewBox="0 0 512 512" xml:space="preserve"><g><g><path d="M437.02,74.98C388.667,26.629,324.38,0,256,0S123.333,26.629,74.98,74.98C26.629,123.333,0,187.62,0,256s26.629,132.668,74.98,181.02C123.333,485.371,187.62,512,256,512s132.667-26.629,181.02-74.98C485.371,388.668,512,324.38,512,256S485.371,123.333,437.02,74.98z M256,472c-119.103,0-216-96.897-216-216S136.897,40,256,40s216,96.897,216,216S375.103,472,256,472z"/></g></g><g><g><path d="M368.993,285.776c-0.072,0.214-7.298,21.626-25.02,42.393C321.419,354.599,292.628,368,258.4,368c-34.475,0-64.195-13.561-88.333-40.303c-18.92-20.962-27.272-42.54-27.33-42.691l-37.475,13.99c0.42,1.122,10.533,27.792,34.013,54.273C171.022,389.074,212.215,408,258.4,408c46.412,0,86.904-19.076,117.099-55.166c22.318-26.675,31.165-53.55,31.531-54.681L368.993,285.776z"/></g></g><g><g><circle cx="168" cy="180.12" r="32"/></g></g><g><g><circle cx="344" cy="180.12" r="32"/></g></g></svg>"#;

/// Called after an emoji was appended to a field
pub type SelectCallback = Rc<dyn Fn(&EmojiEntry, &TargetField)>;

#[derive(Clone)]
pub struct PickerOptions {
    /// HTML injected inside the trigger span
    pub trigger_markup: String,
    /// CSS property → value applied to the trigger, relative to the field wrapper.
    /// Declarations are written in this order.
    pub trigger_position: Vec<(String, String)>,
    /// Right padding (px) given to the field so text does not run under the trigger
    pub target_right_padding: u32,
    pub dataset_url: String,
    pub on_select: Option<SelectCallback>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            trigger_markup: DEFAULT_TRIGGER_MARKUP.to_string(),
            trigger_position: default_trigger_position(),
            target_right_padding: DEFAULT_TARGET_RIGHT_PADDING,
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            on_select: None,
        }
    }
}

impl fmt::Debug for PickerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerOptions")
            .field("trigger_position", &self.trigger_position)
            .field("target_right_padding", &self.target_right_padding)
            .field("dataset_url", &self.dataset_url)
            .field("on_select", &self.on_select.is_some())
            .finish_non_exhaustive()
    }
}

fn default_trigger_position() -> Vec<(String, String)> {
    vec![
        ("top".to_string(), "5px".to_string()),
        ("right".to_string(), "5px".to_string()),
    ]
}

impl PickerOptions {
    pub fn trigger_markup(mut self, markup: impl Into<String>) -> Self {
        self.trigger_markup = markup.into();
        self
    }

    /// Replaces every position declaration, keeping the given order
    pub fn trigger_position<K, V>(mut self, position: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.trigger_position = position
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn target_right_padding(mut self, px: u32) -> Self {
        self.target_right_padding = px;
        self
    }

    pub fn dataset_url(mut self, url: impl Into<String>) -> Self {
        self.dataset_url = url.into();
        self
    }

    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: Fn(&EmojiEntry, &TargetField) + 'static,
    {
        self.on_select = Some(Rc::new(callback));
        self
    }

    /// Inline style for the trigger span
    pub fn trigger_css(&self) -> String {
        self.trigger_position
            .iter()
            .map(|(name, value)| format!("{}:{};", name, value))
            .collect()
    }

    /// `padding-right` value for the wrapped field
    pub fn field_padding(&self) -> String {
        format!("{}px", self.target_right_padding)
    }

    /// Build options from a JS options object. `undefined`/`null` yield the defaults.
    pub fn from_js(value: &JsValue) -> Result<Self, PickerError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        if !value.is_object() || value.is_function() || js_sys::Array::is_array(value) {
            return Err(PickerError::InvalidOptions(
                value.js_typeof().as_string().unwrap_or_default(),
            ));
        }

        let raw: RawOptions = serde_wasm_bindgen::from_value(value.clone())?;
        let mut options = raw.into_options();

        for key in ["onSelect", "selection_callback"] {
            let callback = js_sys::Reflect::get(value, &JsValue::from_str(key))?;
            if let Ok(function) = callback.dyn_into::<js_sys::Function>() {
                options.on_select = Some(js_callback(function));
                break;
            }
        }

        Ok(options)
    }
}

fn js_callback(function: js_sys::Function) -> SelectCallback {
    Rc::new(move |entry: &EmojiEntry, field: &TargetField| {
        let entry = match serde_wasm_bindgen::to_value(entry) {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("Failed to convert emoji for selection callback: {}", e);
                return;
            }
        };
        if let Err(e) = function.call2(&JsValue::NULL, &entry, field.element()) {
            log::error!("Emoji selection callback threw: {:?}", e);
        }
    })
}

/// Data part of the JS options object
///
/// Position values and the padding are kept as raw JSON so `{top: 0}` or
/// `targetRightPadding: "30"` are accepted like their string/number forms.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawOptions {
    #[serde(alias = "picker_trigger")]
    trigger_markup: Option<String>,
    #[serde(alias = "trigger_position")]
    trigger_position: Option<Map<String, Value>>,
    #[serde(alias = "target_r_padding")]
    target_right_padding: Option<Value>,
    #[serde(alias = "emoji_json_url")]
    dataset_url: Option<String>,
}

impl RawOptions {
    fn into_options(self) -> PickerOptions {
        let defaults = PickerOptions::default();
        PickerOptions {
            trigger_markup: self.trigger_markup.unwrap_or(defaults.trigger_markup),
            trigger_position: self
                .trigger_position
                .map(position_declarations)
                .unwrap_or(defaults.trigger_position),
            target_right_padding: self
                .target_right_padding
                .and_then(|value| padding_px(&value))
                .unwrap_or(defaults.target_right_padding),
            dataset_url: self.dataset_url.unwrap_or(defaults.dataset_url),
            on_select: None,
        }
    }
}

fn position_declarations(position: Map<String, Value>) -> Vec<(String, String)> {
    position
        .into_iter()
        .filter_map(|(name, value)| match css_value(&value) {
            Some(value) => Some((name, value)),
            None => {
                log::warn!("Ignoring trigger position {:?}: {}", name, value);
                None
            }
        })
        .collect()
}

fn css_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // JS numbers may arrive as floats, print integral ones like JS does
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some((f as i64).to_string()),
            _ => Some(n.to_string()),
        },
        _ => None,
    }
}

fn padding_px(value: &Value) -> Option<u32> {
    let px = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches("px").trim().parse::<f64>().ok(),
        _ => None,
    };
    match px {
        Some(px) if px.is_finite() && px >= 0.0 => Some(px as u32),
        _ => {
            log::warn!("Ignoring target right padding {}, using the default", value);
            None
        }
    }
}
