use crate::form::ValidityReport;
use crate::types::PredictionOutcome;
use std::path::PathBuf;

/// Clickable controls of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Predict,
    ExportPdf,
    Reset,
}

/// Named UI events the flow reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Submit,
    InputChanged { field: String, value: String },
    Click(Control),
}

impl UiEvent {
    pub fn input<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Self::InputChanged {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// How a submission ended; request failures are reported, not returned as
/// errors, because the flow already surfaced them to the user
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rendered(Box<PredictionOutcome>),
    /// Required fields missing; nothing was sent
    Invalid(ValidityReport),
    /// The alert shown to the user
    Failed { message: String },
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Submitted(SubmitOutcome),
    /// `bmi` carries the recomputed value when the edit touched height or weight
    InputUpdated { bmi: Option<String> },
    Reset { confirmed: bool },
    Exported(PathBuf),
}
