// Page-wide state
// The dataset, the popup state machine and the registry tying them to the DOM

pub mod emoji_store;
pub mod picker_registry;
pub mod picker_state;
