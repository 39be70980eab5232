//! End-to-end submissions through the flow and a real HTTP client

use screening::dom::{ids, PREDICT_LABEL};
use screening::{EventOutcome, PredictionService, ScreeningError, SubmitOutcome, UiEvent};
use screening_tests::{flow_for, prediction_service, success_body};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_diabetic_result_is_rendered_in_alert_theme() {
    let server = prediction_service(ResponseTemplate::new(200).set_body_json(success_body("DIABETIC"))).await;
    let flow = flow_for(&server);

    let outcome = flow.handle_submit().await.unwrap();
    assert!(outcome.is_rendered());

    let page = flow.page().snapshot();
    let label = page.element(ids::RES_LABEL).unwrap();
    assert_eq!(label.text_content(), "DIAGNOSIS: DIABETIC");
    assert_eq!(label.style.get("color"), Some("#ef4444"));
    assert_eq!(page.element(ids::RES_PROB).unwrap().style.get("color"), Some("#ef4444"));
    assert_eq!(page.text_of(ids::RES_PROB).as_deref(), Some("87.5%"));

    let fills = page.body().find_by_class("bar-fill");
    assert_eq!(fills.len(), 2);
    assert!(fills.iter().all(|fill| fill.style.get("background") == Some("#ef4444")));

    assert!(page.is_result_visible());
    assert!(flow.service().is_connected());
    assert_eq!(flow.notifier().scrolls(), vec![ids::RESULT_CONTAINER.to_string()]);
}

#[tokio::test]
async fn test_payload_is_normalized_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .and(body_partial_json(json!({
            "age": 52,
            "glucose": 8.4,
            "height": 1.75,
            "weight": 70.0,
            "bmi": 22.86,
            "gender": "Female",
            "hypertensive": "Yes"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Non-Diabetic")))
        .expect(1)
        .mount(&server)
        .await;

    let flow = flow_for(&server);
    let outcome = flow.handle_submit().await.unwrap();

    assert!(outcome.is_rendered());
    assert_eq!(flow.form_snapshot().get("bmi"), Some("22.86"));
}

#[tokio::test]
async fn test_html_error_page_alerts_and_marks_offline() {
    let server = prediction_service(
        ResponseTemplate::new(500)
            .insert_header("content-type", "text/html")
            .set_body_string("<h1>Internal Server Error</h1>"),
    )
    .await;
    let flow = flow_for(&server);

    let outcome = flow.handle_submit().await.unwrap();

    let SubmitOutcome::Failed { message } = outcome else {
        panic!("expected a failed submission");
    };
    assert!(message.contains("500"));
    assert_eq!(flow.notifier().alerts(), vec![message]);
    assert!(!flow.service().is_connected());

    let page = flow.page().snapshot();
    assert!(!page.is_result_visible());
    assert_eq!(page.text_of(ids::BTN_PREDICT).as_deref(), Some(PREDICT_LABEL));
    assert!(!page.is_disabled(ids::BTN_PREDICT));
}

#[tokio::test]
async fn test_api_error_message_is_surfaced_with_failure_prefix() {
    let server = prediction_service(
        ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid glucose value"})),
    )
    .await;
    let flow = flow_for(&server);

    let outcome = flow.handle_submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Analisis Gagal: Invalid glucose value".to_string()
        }
    );
    assert_eq!(flow.notifier().alerts().len(), 1);
}

#[tokio::test]
async fn test_unsuccessful_prediction_is_not_rendered() {
    let server = prediction_service(
        ResponseTemplate::new(200).set_body_json(json!({"success": false, "error": "Model belum dimuat."})),
    )
    .await;
    let flow = flow_for(&server);

    flow.handle_submit().await.unwrap();

    assert_eq!(
        flow.notifier().alerts(),
        vec!["Analisis Gagal: Model belum dimuat.".to_string()]
    );
    assert_eq!(flow.page().snapshot().text_of(ids::RES_LABEL).as_deref(), Some(""));
    assert!(flow.service().is_connected());
}

#[tokio::test]
async fn test_second_submit_while_first_is_outstanding_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body("Diabetic"))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let flow = flow_for(&server);

    let (first, second) = tokio::join!(flow.dispatch(UiEvent::Submit), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        flow.dispatch(UiEvent::Submit).await
    });

    assert!(matches!(first, Ok(EventOutcome::Submitted(SubmitOutcome::Rendered(_)))));
    assert!(matches!(second, Err(ScreeningError::Busy { .. })));
}

#[tokio::test]
async fn test_history_and_metadata_through_service_trait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "logs": [{"timestamp": "2024-05-01 10:00", "result": "Diabetic", "confidence": 0.87}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/model-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accuracy_cv": 0.9926})))
        .mount(&server)
        .await;

    let flow = flow_for(&server);
    let history = flow.service().history().await.unwrap();
    assert!(history.success);
    assert_eq!(history.logs[0]["result"], "Diabetic");

    let metadata = flow.service().model_metadata().await.unwrap();
    assert_eq!(metadata["accuracy_cv"], 0.9926);
}
