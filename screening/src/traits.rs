use crate::dom::Element;
use crate::error::Result;
use crate::export::PdfExportOptions;
use crate::types::{LogsResponse, ModelMetadata, PredictionRequest, PredictionResponse};
use std::future::Future;
use std::path::PathBuf;

/// Typed capabilities of the prediction service, as consumed by the flow
pub trait PredictionService: Send + Sync {
    /// Submit a normalized payload and decode the diagnosis
    fn diagnose(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResponse>> + Send;

    /// Fetch the prediction history
    fn history(&self) -> impl Future<Output = Result<LogsResponse>> + Send;

    /// Fetch model metadata; a successful fetch doubles as a liveness proof
    fn model_metadata(&self) -> impl Future<Output = Result<ModelMetadata>> + Send;
}

/// User-facing side effects the page cannot express as tree mutations
pub trait Notifier: Send + Sync {
    /// Show a blocking alert
    fn alert(&self, message: &str);

    /// Ask the user a yes/no question
    fn confirm(&self, message: &str) -> bool;

    /// Bring the element with the given id into view
    fn scroll_into_view(&self, element_id: &str);
}

/// Opaque render-to-canvas-to-PDF converter
pub trait PdfConverter: Send + Sync {
    /// Render the snapshot with the given capture configuration and return
    /// where the document was saved
    fn convert(
        &self,
        snapshot: &Element,
        options: &PdfExportOptions,
    ) -> impl Future<Output = Result<PathBuf>> + Send;
}
