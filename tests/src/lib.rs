//! Shared fixtures for the integration tests: a wiremock prediction
//! service and a flow wired to it.

use screening::testing::{MockNotifier, MockPdfConverter};
use screening::{ApiClient, ClientConfig, PredictionFlow, ReportExporter};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub type ServiceFlow = PredictionFlow<ApiClient, MockNotifier, MockPdfConverter>;

/// Every field the default form schema requires
pub const PATIENT: [(&str, &str); 10] = [
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
];

/// Body of a successful `POST /api/predict`
pub fn success_body(label: &str) -> Value {
    json!({
        "success": true,
        "label": label,
        "risk_level": "Tinggi",
        "probability_percent": 87.5,
        "model_info": {"name": "Decision Tree (CART)", "accuracy": "99.26%"},
        "input_data": {
            "age": 52,
            "gender": "Female",
            "glucose": 8.4,
            "bmi": 22.86,
            "systolic_bp": 140,
            "diastolic_bp": 90,
            "hypertensive": "Yes",
            "pulse_rate": 80
        },
        "feature_importance": [
            {"name": "Kadar Glukosa Darah", "value": 61.234},
            {"name": "Faktor Usia", "value": 20.5}
        ]
    })
}

/// Mock service answering every prediction with `response`
pub async fn prediction_service(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

/// Flow against `server` with the patient form filled in and no export delay
pub fn flow_for(server: &MockServer) -> ServiceFlow {
    flow_with_converter(server, MockPdfConverter::new())
}

pub fn flow_with_converter(server: &MockServer, converter: MockPdfConverter) -> ServiceFlow {
    let client = match ApiClient::new(ClientConfig::new(server.uri())) {
        Ok(client) => client,
        Err(error) => panic!("client construction failed: {error}"),
    };
    let flow = PredictionFlow::new(client, MockNotifier::new(), converter)
        .with_exporter(ReportExporter::with_settle_delay(Duration::ZERO));
    flow.fill(PATIENT);
    flow
}
