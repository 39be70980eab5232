//! In-memory document model standing in for the browser page: an element
//! tree with ids, classes and inline style, and the fixed report layout.

pub mod element;
pub mod page;

pub use element::{html_escape, Element, InlineStyle};
pub use page::{html_document, ids, Page, SharedPage, EXPORT_LABEL, PREDICT_LABEL, RESET_LABEL};
