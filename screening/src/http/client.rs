use crate::config::ClientConfig;
use crate::error::{Result, ScreeningError, TransportError};
use crate::http::request_builder::{build_request, normalize_endpoint, RequestOptions};
use crate::http::response_converter::classify_response;
use crate::traits::PredictionService;
use crate::types::{LogsResponse, ModelMetadata, PredictionRequest, PredictionResponse};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const PREDICT_ENDPOINT: &str = "/api/predict";
pub const MODEL_INFO_ENDPOINT: &str = "/api/model-info";
pub const LOGS_ENDPOINT: &str = "/api/logs";

/// Read-only view of the client's last-known connectivity
#[derive(Debug, Clone)]
pub struct ConnectivityHandle(Arc<AtomicBool>);

impl ConnectivityHandle {
    /// Outcome of the most recent request; a cache, not a live probe
    pub fn is_connected(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Single point of contact with the prediction service
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    connected: Arc<AtomicBool>,
}

impl ApiClient {
    /// Create a client for the configured base address. No request timeout
    /// is applied.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder().build().map_err(TransportError::from)?;

        tracing::debug!(base_address = config.base_address(), "API client initialized");

        Ok(Self {
            client,
            config,
            connected: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub fn connectivity(&self) -> ConnectivityHandle {
        ConnectivityHandle(Arc::clone(&self.connected))
    }

    /// Full URL for an endpoint, after normalization
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_address(), normalize_endpoint(endpoint))
    }

    /// Issue a request and return the parsed JSON body.
    ///
    /// Every classified failure flips connectivity to `false`, is logged,
    /// and is returned to the caller.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let endpoint = normalize_endpoint(endpoint);
        let method = options.method.clone();

        match self.send(&endpoint, options).await {
            Ok(data) => {
                self.connected.store(true, Ordering::Relaxed);
                Ok(data)
            }
            Err(error) => {
                if error.is_request_failure() {
                    self.connected.store(false, Ordering::Relaxed);
                    tracing::error!(%method, endpoint = %endpoint, error = %error, "API request failed");
                }
                Err(error)
            }
        }
    }

    async fn send(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let headers = options.merged_headers()?;
        let body = options.body.map(|body| body.into_payload()).transpose()?;

        tracing::debug!(method = %options.method, endpoint, "Sending API request");

        let request = build_request(
            &self.client,
            self.config.base_address(),
            endpoint,
            options.method,
            headers,
            body,
        )?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(TransportError::from)?;

        classify_response(response).await
    }

    /// Health check. There is no dedicated liveness endpoint, so a
    /// successful metadata fetch is taken as proof of health.
    pub async fn check_connection(&self) -> Result<Value> {
        self.request(MODEL_INFO_ENDPOINT, RequestOptions::get()).await
    }

    /// Send a prediction payload. Anything that is not a JSON object is
    /// rejected before a request is made.
    pub async fn predict<P: Serialize + ?Sized + Sync>(&self, payload: &P) -> Result<Value> {
        let payload = serde_json::to_value(payload)
            .map_err(|e| ScreeningError::validation(format!("Data input tidak valid: {e}")))?;

        if !payload.is_object() {
            return Err(ScreeningError::validation("Data input tidak valid."));
        }

        self.request(PREDICT_ENDPOINT, RequestOptions::post_json(payload))
            .await
    }

    /// Typed form of [`ApiClient::predict`]
    pub async fn predict_request(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        let data = self.predict(request).await?;
        PredictionResponse::from_value(data)
    }

    pub async fn get_logs(&self) -> Result<Value> {
        self.request(LOGS_ENDPOINT, RequestOptions::get()).await
    }

    pub async fn get_model_info(&self) -> Result<Value> {
        self.request(MODEL_INFO_ENDPOINT, RequestOptions::get()).await
    }

    /// Startup probe: logs the outcome and reports reachability, never fails
    pub async fn announce_connection(&self) -> bool {
        match self.check_connection().await {
            Ok(_) => {
                tracing::info!(base_address = self.config.base_address(), "API connected & healthy");
                true
            }
            Err(error) => {
                tracing::warn!(
                    base_address = self.config.base_address(),
                    error = %error,
                    "API offline or not responding"
                );
                false
            }
        }
    }
}

impl PredictionService for ApiClient {
    async fn diagnose(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        self.predict_request(request).await
    }

    async fn history(&self) -> Result<LogsResponse> {
        let data = self.get_logs().await?;
        LogsResponse::from_value(data)
    }

    async fn model_metadata(&self) -> Result<ModelMetadata> {
        match self.get_model_info().await? {
            Value::Object(metadata) => Ok(metadata),
            other => Err(ScreeningError::validation(format!(
                "Model metadata is not a JSON object: {other}"
            ))),
        }
    }
}
