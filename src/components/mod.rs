// Widget building blocks
// Each component owns one part of the page: the stylesheet, the popup markup,
// the wrapped fields and the popup's DOM behavior

pub mod field_wrapper;
pub mod markup;
pub mod popup;
pub mod style;
