use crate::dom::Element;
use crate::error::{Result, ScreeningError, TransportError};
use crate::export::PdfExportOptions;
use crate::traits::{Notifier, PdfConverter, PredictionService};
use crate::types::{LogsResponse, ModelMetadata, PredictionRequest, PredictionResponse};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Failure a mock reproduces on every call
#[derive(Debug, Clone, PartialEq)]
pub enum MockFailure {
    /// Service unreachable or body unparseable
    Transport,
    /// Non-JSON response with the given status
    Server(u16),
    /// JSON error envelope
    Api(u16, String),
}

impl MockFailure {
    fn to_error(&self) -> ScreeningError {
        match self {
            Self::Transport => match serde_json::from_str::<serde_json::Value>("<html>") {
                Err(cause) => TransportError::Json(cause).into(),
                Ok(_) => ScreeningError::validation("unreachable"),
            },
            Self::Server(status) => ScreeningError::Server { status: *status },
            Self::Api(status, message) => ScreeningError::Api {
                status: *status,
                message: message.clone(),
            },
        }
    }
}

/// Mock prediction service for testing
#[derive(Clone)]
pub struct MockPredictionService {
    pub response: PredictionResponse,
    pub failure: Option<MockFailure>,
    pub logs: LogsResponse,
    pub metadata: ModelMetadata,
    pub delay: Duration,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<PredictionRequest>>>,
}

impl MockPredictionService {
    pub fn new() -> Self {
        Self {
            response: PredictionResponse::Success(test_helpers::sample_outcome("Diabetic")),
            failure: None,
            logs: LogsResponse {
                success: true,
                logs: Vec::new(),
                error: None,
            },
            metadata: ModelMetadata::new(),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(mut self, response: PredictionResponse) -> Self {
        self.response = response;
        self
    }

    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn with_logs(mut self, logs: LogsResponse) -> Self {
        self.logs = logs;
        self
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Hold every diagnosis for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of diagnoses requested so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PredictionRequest> {
        lock(&self.requests).clone()
    }

    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

impl Default for MockPredictionService {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionService for MockPredictionService {
    async fn diagnose(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.requests).push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.check_failure()?;
        Ok(self.response.clone())
    }

    async fn history(&self) -> Result<LogsResponse> {
        self.check_failure()?;
        Ok(self.logs.clone())
    }

    async fn model_metadata(&self) -> Result<ModelMetadata> {
        self.check_failure()?;
        Ok(self.metadata.clone())
    }
}

/// Records alerts, confirmations and scroll requests
pub struct MockNotifier {
    pub confirm_answer: bool,
    alerts: Mutex<Vec<String>>,
    confirmations: Mutex<Vec<String>>,
    scrolls: Mutex<Vec<String>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            confirm_answer: true,
            alerts: Mutex::new(Vec::new()),
            confirmations: Mutex::new(Vec::new()),
            scrolls: Mutex::new(Vec::new()),
        }
    }

    /// Notifier whose user answers "no" to every confirmation
    pub fn declining() -> Self {
        Self {
            confirm_answer: false,
            ..Self::new()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }

    pub fn confirmations(&self) -> Vec<String> {
        lock(&self.confirmations).clone()
    }

    pub fn scrolls(&self) -> Vec<String> {
        lock(&self.scrolls).clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MockNotifier {
    fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        lock(&self.confirmations).push(message.to_string());
        self.confirm_answer
    }

    fn scroll_into_view(&self, element_id: &str) {
        lock(&self.scrolls).push(element_id.to_string());
    }
}

type ConvertHook = Arc<dyn Fn() + Send + Sync>;

/// Mock PDF converter: records what it was given and "saves" to the
/// configured filename
#[derive(Clone, Default)]
pub struct MockPdfConverter {
    pub failure: Option<String>,
    pub delay: Duration,
    hook: Option<ConvertHook>,
    calls: Arc<Mutex<Vec<(Element, PdfExportOptions)>>>,
}

impl MockPdfConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing<S: Into<String>>(message: S) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Run `hook` while the conversion is in progress
    pub fn on_convert<F: Fn() + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn calls(&self) -> Vec<(Element, PdfExportOptions)> {
        lock(&self.calls).clone()
    }
}

impl PdfConverter for MockPdfConverter {
    async fn convert(&self, snapshot: &Element, options: &PdfExportOptions) -> Result<PathBuf> {
        lock(&self.calls).push((snapshot.clone(), options.clone()));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(hook) = &self.hook {
            hook();
        }

        match &self.failure {
            Some(message) => Err(ScreeningError::export(message.clone())),
            None => Ok(PathBuf::from(&options.filename)),
        }
    }
}

/// Test helper functions
pub mod test_helpers {
    use crate::form::FormState;
    use crate::types::{FeatureImportance, ModelInfo, PredictionOutcome};
    use serde_json::{json, Map, Value};

    /// A complete outcome with two dominant factors
    pub fn sample_outcome(label: &str) -> PredictionOutcome {
        let input_data = match json!({
            "age": 52,
            "gender": "Female",
            "glucose": 8.4,
            "bmi": 22.86,
            "systolic_bp": 140,
            "diastolic_bp": 90,
            "hypertensive": "Yes",
            "pulse_rate": 80
        }) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        PredictionOutcome {
            label: label.to_string(),
            risk_level: if label.eq_ignore_ascii_case("diabetic") {
                "Tinggi".to_string()
            } else {
                "Rendah".to_string()
            },
            probability_percent: 87.5,
            model_info: ModelInfo {
                name: "Decision Tree (CART)".to_string(),
                accuracy: "99.26%".to_string(),
            },
            input_data,
            feature_importance: vec![
                FeatureImportance {
                    name: "Kadar Glukosa Darah".to_string(),
                    value: 61.234,
                },
                FeatureImportance {
                    name: "Faktor Usia".to_string(),
                    value: 20.5,
                },
            ],
        }
    }

    /// A form with every default-required field filled
    pub fn filled_form() -> FormState {
        let mut form = FormState::new();
        for (field, value) in [
            ("age", "52"),
            ("gender", "Female"),
            ("pulse_rate", "80"),
            ("systolic_bp", "140"),
            ("diastolic_bp", "90"),
            ("glucose", "8.4"),
            ("height", "1.75"),
            ("weight", "70"),
            ("family_diabetes", "Yes"),
            ("hypertensive", "Yes"),
        ] {
            form.set_field(field, value);
        }
        form
    }
}
