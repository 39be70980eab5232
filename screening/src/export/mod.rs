//! PDF export of the rendered report.
//!
//! The exporter never touches the live report: it works on a sanitized deep
//! copy and hands it to an opaque [`PdfConverter`](crate::traits::PdfConverter).

pub mod converter;
pub mod exporter;
pub mod options;
pub mod sanitizer;

pub use converter::HtmlSnapshotConverter;
pub use exporter::{ReportExporter, DEFAULT_SETTLE_DELAY, EXPORT_PROGRESS_LABEL};
pub use options::{CaptureOptions, ImageOptions, PageOptions, PdfExportOptions};
pub use sanitizer::{build_export_snapshot, prepare_snapshot, sanitize, SNAPSHOT_ID};
