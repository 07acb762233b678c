//! Emoji picker for text inputs and textareas
//!
//! Wraps matching fields with a trigger icon and shares a single categorized,
//! searchable emoji popup between all of them. The emoji dataset is fetched once per
//! page; clicking an emoji appends it to the field of the trigger that opened the
//! popup.

pub mod components;
pub mod error;
pub mod options;
pub mod picker;
pub mod services;
pub mod stores;
pub mod utils;

pub use components::field_wrapper::TargetField;
pub use error::PickerError;
pub use options::PickerOptions;
pub use picker::{dataset_status, is_open, provide_dataset, teardown, EmojiPicker};
pub use stores::emoji_store::{EmojiCategory, EmojiDataset, EmojiEntry};

/// Route `log` to the browser console and install the panic hook, once.
///
/// Only used for plain JS hosts. Does nothing to the logger when the host already
/// installed one; Rust hosts set up logging themselves.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            console_error_panic_hook::set_once();
            if needs_logger(log::max_level()) {
                wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
            }
        });
    }
}

/// No logger has been installed while the max level is still `Off`
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn needs_logger(current: log::LevelFilter) -> bool {
    current == log::LevelFilter::Off
}
