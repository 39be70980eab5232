//! Request shape and failure classification of the HTTP client

use screening::http::{Method, RequestBody, RequestOptions};
use screening::{resolve_client_config, ApiClient, ClientConfig, ScreeningConfig, ScreeningError};
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn test_endpoint_without_leading_slash_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "logs": []})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.request("api/logs", RequestOptions::get()).await.unwrap();
    client.request("/api/logs", RequestOptions::get()).await.unwrap();
}

#[tokio::test]
async fn test_caller_headers_override_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .and(header("content-type", "text/plain"))
        .and(header("accept", "application/json"))
        .and(body_string("age=45"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = RequestOptions::get()
        .with_method(Method::POST)
        .with_header("Content-Type", "text/plain")
        .with_body(RequestBody::Text("age=45".to_string()));

    let data = client.request("/api/predict", options).await.unwrap();
    assert_eq!(data["success"], false);
}

#[tokio::test]
async fn test_server_error_flips_connectivity_handle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/model-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accuracy_cv": 0.99})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/model-info"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>boom</html>"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let handle = client.connectivity();

    assert!(client.check_connection().await.is_ok());
    assert!(handle.is_connected());

    let error = client.check_connection().await.unwrap_err();
    assert!(matches!(error, ScreeningError::Server { status: 500 }));
    assert!(!handle.is_connected());
}

#[tokio::test]
async fn test_message_field_is_used_when_error_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logs"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/model-info"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.get_logs().await.unwrap_err().to_string(), "Not Found");
    assert_eq!(
        client.get_model_info().await.unwrap_err().to_string(),
        "HTTP Error 503"
    );
}

#[tokio::test]
async fn test_config_file_feeds_the_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/model-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("diascreen.toml");
    fs::write(
        &config_path,
        format!("[client]\nbase_address = \"{}\"\n", server.uri()),
    )
    .unwrap();

    let file = ScreeningConfig::load_from_file(&config_path).unwrap();
    let client = ApiClient::new(resolve_client_config(None, Some(&file))).unwrap();

    assert!(client.announce_connection().await);
}
