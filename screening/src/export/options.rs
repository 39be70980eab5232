use serde::{Deserialize, Serialize};

/// Capture configuration handed to the PDF converter.
///
/// Field names follow the converter's own option keys when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfExportOptions {
    /// Page margins in `page.unit`, vertical then horizontal
    pub margin: [f64; 2],
    pub filename: String,
    pub image: ImageOptions,
    #[serde(rename = "html2canvas")]
    pub capture: CaptureOptions,
    #[serde(rename = "jsPDF")]
    pub page: PageOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    #[serde(rename = "type")]
    pub format: String,
    pub quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOptions {
    pub scale: u32,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
    pub background_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    pub unit: String,
    pub format: String,
    pub orientation: String,
}

impl PdfExportOptions {
    /// Options for an export started now
    pub fn now() -> Self {
        Self::for_timestamp(chrono::Utc::now().timestamp_millis())
    }

    /// Options whose filename carries the given Unix time in milliseconds
    pub fn for_timestamp(unix_millis: i64) -> Self {
        Self {
            margin: [0.5, 0.5],
            filename: format!("Laporan_Diagnosa_{unix_millis}.pdf"),
            image: ImageOptions {
                format: "jpeg".to_string(),
                quality: 1.0,
            },
            capture: CaptureOptions {
                scale: 2,
                use_cors: true,
                background_color: "#ffffff".to_string(),
            },
            page: PageOptions {
                unit: "in".to_string(),
                format: "a4".to_string(),
                orientation: "portrait".to_string(),
            },
        }
    }

    /// Filename without its `.pdf` extension
    pub fn file_stem(&self) -> &str {
        self.filename.strip_suffix(".pdf").unwrap_or(&self.filename)
    }
}
