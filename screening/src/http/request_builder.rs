use crate::error::{Result, ScreeningError, TransportError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request};
use serde_json::Value;
use std::borrow::Cow;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Prefix an endpoint with `/` unless it already starts with one
pub fn normalize_endpoint(endpoint: &str) -> Cow<'_, str> {
    if endpoint.starts_with('/') {
        Cow::Borrowed(endpoint)
    } else {
        Cow::Owned(format!("/{endpoint}"))
    }
}

/// Request body, either a structured value or a pre-serialized string
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Text(String),
}

impl RequestBody {
    /// Serialize structured bodies to JSON; strings are sent verbatim
    pub fn into_payload(self) -> Result<String> {
        match self {
            Self::Json(value) => serde_json::to_string(&value).map_err(|e| {
                ScreeningError::validation(format!("Request body is not serializable: {e}"))
            }),
            Self::Text(text) => Ok(text),
        }
    }
}

/// Caller options merged over the client defaults (`GET`, JSON headers)
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    /// `POST` with a structured body
    pub fn post_json(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(RequestBody::Json(body)),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Default headers with the caller's headers layered on top
    pub fn merged_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                ScreeningError::validation(format!("Invalid header name: {name}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                ScreeningError::validation(format!("Invalid value for header {name}"))
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

/// Build the outgoing request for an already-normalized endpoint
pub fn build_request(
    client: &Client,
    base_address: &str,
    endpoint: &str,
    method: Method,
    headers: HeaderMap,
    body: Option<String>,
) -> Result<Request> {
    let url = url::Url::parse(&format!("{base_address}{endpoint}")).map_err(TransportError::from)?;

    let mut request_builder = client.request(method, url).headers(headers);
    if let Some(body) = body {
        request_builder = request_builder.body(body);
    }

    request_builder
        .build()
        .map_err(|e| TransportError::from(e).into())
}
