use crate::dom::{html_document, Element};
use crate::error::Result;
use crate::export::options::PdfExportOptions;
use crate::traits::PdfConverter;
use std::path::{Path, PathBuf};

/// Writes the sanitized snapshot as a print-ready HTML page named after
/// the PDF it stands in for. Rasterizing to PDF is left to the browser.
#[derive(Debug, Clone)]
pub struct HtmlSnapshotConverter {
    output_dir: PathBuf,
}

impl HtmlSnapshotConverter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Print rules equivalent to the capture configuration
    fn print_style(options: &PdfExportOptions) -> String {
        let [vertical, horizontal] = options.margin;
        let unit = &options.page.unit;
        format!(
            "<style>@page {{ size: {} {}; margin: {vertical}{unit} {horizontal}{unit}; }} body {{ background: {}; }}</style>",
            options.page.format.to_uppercase(),
            options.page.orientation,
            options.capture.background_color,
        )
    }
}

impl PdfConverter for HtmlSnapshotConverter {
    async fn convert(&self, snapshot: &Element, options: &PdfExportOptions) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let mut printable = snapshot.clone();
        // Back on-screen: the off-screen offset only matters while attached to the live page
        printable.style.remove("left");
        printable.style.remove("position");

        let body = format!(
            "<body>{}{}</body>",
            Self::print_style(options),
            printable.to_html()
        );
        let document = html_document(options.file_stem(), &body);

        let path = self.output_dir.join(format!("{}.html", options.file_stem()));
        tokio::fs::write(&path, document).await?;

        tracing::info!(path = %path.display(), "Export snapshot written");
        Ok(path)
    }
}
