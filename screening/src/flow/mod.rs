//! Event-driven orchestration of one screening session.

pub mod events;
pub mod guard;
pub mod prediction;

pub use events::{Control, EventOutcome, SubmitOutcome, UiEvent};
pub use guard::{FlightPermit, SingleFlight};
pub use prediction::{PredictionFlow, FAILURE_PREFIX, PREDICT_PROGRESS_LABEL, RESET_PROMPT};
