//! Screening - client layer of a diabetes screening service
//!
//! This crate sends patient measurements to a prediction service, renders
//! the returned diagnosis into an in-memory report page, and exports a
//! print-safe copy of that report through a pluggable PDF converter.

// Core modules
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Main functionality modules
pub mod dom;
pub mod export;
pub mod flow;
pub mod form;
pub mod http;
pub mod renderers;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export main types for convenience
pub use config::{resolve_client_config, ClientConfig, ScreeningConfig, DEFAULT_ORIGIN};
pub use dom::{Element, Page, SharedPage};
pub use error::{Result, ScreeningError, TransportError};
pub use export::{HtmlSnapshotConverter, PdfExportOptions, ReportExporter};
pub use flow::{Control, EventOutcome, PredictionFlow, SubmitOutcome, UiEvent};
pub use form::{FieldNormalizer, FormSchema, FormState};
pub use http::{ApiClient, ConnectivityHandle};
pub use renderers::{OutputRenderer, ResultRenderer, SummaryRenderer, TableBuilder, TableStyle};
pub use traits::{Notifier, PdfConverter, PredictionService};
pub use types::{
    FeatureImportance, FieldValue, LogsResponse, ModelInfo, ModelMetadata, PredictionOutcome,
    PredictionRequest, PredictionResponse,
};

/// Normalize raw form entries and run a single prediction
pub async fn predict_once<'a, I>(config: ClientConfig, entries: I) -> Result<PredictionResponse>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let client = ApiClient::new(config)?;
    let request = FieldNormalizer::new().normalize(entries);
    client.predict_request(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_imports() {
        let config = ClientConfig::default();
        assert_eq!(config.base_address(), DEFAULT_ORIGIN);

        let request = FieldNormalizer::new().normalize([("age", "45"), ("gender", "Male")]);
        assert_eq!(request.get("age"), Some(&FieldValue::Integer(45)));
    }

    #[test]
    fn test_error_types() {
        let error = ScreeningError::validation("Data input tidak valid.");
        assert!(error.to_string().contains("Data input tidak valid."));

        let error = ScreeningError::Busy { operation: "prediksi" };
        assert!(error.user_message().contains("prediksi"));
    }

    #[test]
    fn test_predict_once_reports_unreachable_service() {
        let result = tokio_test::block_on(predict_once(
            ClientConfig::new("http://127.0.0.1:9"),
            [("age", "45")],
        ));
        assert!(matches!(result, Err(ScreeningError::Transport(_))));
    }

    #[test]
    fn test_fresh_page_has_hidden_report() {
        let page = Page::new();
        assert!(!page.is_result_visible());
        assert!(page.to_document().contains("resultContainer"));
    }
}
