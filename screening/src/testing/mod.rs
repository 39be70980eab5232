pub mod mocks;

pub use mocks::{test_helpers, MockFailure, MockNotifier, MockPdfConverter, MockPredictionService};
