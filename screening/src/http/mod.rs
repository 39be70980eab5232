pub mod client;
pub mod request_builder;
pub mod response_converter;

pub use client::{ApiClient, ConnectivityHandle, LOGS_ENDPOINT, MODEL_INFO_ENDPOINT, PREDICT_ENDPOINT};
pub use request_builder::{normalize_endpoint, RequestBody, RequestOptions};
pub use reqwest::Method;
pub use response_converter::{classify_response, extract_error_message};
