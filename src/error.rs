//! Picker error types
//!
//! Every failure in the widget is non-fatal to the host page: construction errors are
//! returned (or logged by the JS surface), everything that happens inside an event
//! handler is logged and swallowed.

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum PickerError {
    /// Empty or missing target selector
    MissingTarget,
    /// Options value was not an object, or a field had the wrong type
    InvalidOptions(String),
    /// No global `window` (not running in a browser)
    NoWindow,
    /// Window has no document
    NoDocument,
    /// A DOM call rejected
    Dom(String),
    /// Dataset request failed or returned a non-2xx status
    Network(String),
    /// Dataset body was not a valid emoji document
    Parse(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget => write!(f, "You must provide a target selector as first argument"),
            Self::InvalidOptions(msg) => write!(f, "Options must be an object: {}", msg),
            Self::NoWindow => write!(f, "No window"),
            Self::NoDocument => write!(f, "No document"),
            Self::Dom(msg) => write!(f, "DOM error: {}", msg),
            Self::Network(msg) => write!(f, "Emoji dataset request failed: {}", msg),
            Self::Parse(msg) => write!(f, "Failed to parse emoji dataset: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<JsValue> for PickerError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_json::Error> for PickerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<gloo_net::Error> for PickerError {
    fn from(e: gloo_net::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for PickerError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::InvalidOptions(e.to_string())
    }
}
