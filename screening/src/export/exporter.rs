use crate::dom::{ids, SharedPage};
use crate::error::Result;
use crate::export::options::PdfExportOptions;
use crate::export::sanitizer::{build_export_snapshot, SNAPSHOT_ID};
use crate::traits::PdfConverter;
use std::path::PathBuf;
use std::time::Duration;

pub const EXPORT_PROGRESS_LABEL: &str = "⏳ Memproses PDF...";

/// Time the attached snapshot is given to settle before capture
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Drives one export: snapshot, settle, convert, clean up
#[derive(Debug, Clone)]
pub struct ReportExporter {
    settle_delay: Duration,
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExporter {
    pub fn new() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Export the page's result container through `converter`.
    ///
    /// The export button stays disabled and the snapshot stays attached
    /// until the converter has finished, whether it succeeded or not.
    pub async fn export<C: PdfConverter>(&self, page: &SharedPage, converter: &C) -> Result<PathBuf> {
        let options = PdfExportOptions::now();

        let (saved_label, snapshot) = page.with(|page| {
            let saved = page.begin_busy(ids::BTN_PDF, EXPORT_PROGRESS_LABEL);
            (saved, build_export_snapshot(page))
        });
        let snapshot = match snapshot {
            Ok(snapshot) => snapshot,
            Err(error) => {
                page.with(|page| page.end_busy(ids::BTN_PDF, saved_label));
                return Err(error);
            }
        };

        page.with(|page| page.append_to_body(snapshot.clone()));
        tracing::debug!(filename = %options.filename, "Export snapshot attached");

        tokio::time::sleep(self.settle_delay).await;
        let result = converter.convert(&snapshot, &options).await;

        page.with(|page| {
            page.remove_from_body(SNAPSHOT_ID);
            page.end_busy(ids::BTN_PDF, saved_label);
        });

        match &result {
            Ok(path) => tracing::debug!(path = %path.display(), "Export finished"),
            Err(error) => tracing::error!(error = %error, "Export failed"),
        }
        result
    }
}
