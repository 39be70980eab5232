//! Renderers for prediction outcomes.
//!
//! [`ResultRenderer`] projects an outcome into the report page; the
//! terminal renderers reuse the same labels and theme for plain-text output.

use crate::types::PredictionOutcome;

/// Render a prediction outcome to a string in a specific format
pub trait OutputRenderer {
    fn render(&self, outcome: &PredictionOutcome) -> String;
}

pub mod result;
pub mod summary;
pub mod table;
pub mod theme;

pub use result::{field_label, ResultRenderer, NO_FACTORS_MESSAGE};
pub use summary::SummaryRenderer;
pub use table::{TableBuilder, TableStyle};
pub use theme::Theme;
