// Utility functions
// Helper functions for common operations

pub mod category;
pub mod dom;
pub mod position;
pub mod search;
pub mod waypoints;

pub use category::CategoryId;
pub use position::{popup_position, PopupPosition, TriggerGeometry};
pub use search::SearchMode;
pub use waypoints::Waypoints;
