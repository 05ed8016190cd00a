//! Face++ client tests against a mock HTTP server.

use std::time::Duration;

use serde_json::json;
use skinsight_facepp::{FaceDetector, FaceppClient, FaceppConfig, FaceppError};
use skinsight_models::Gender;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DETECT_PATH: &str = "/facepp/v3/detect";

fn client_for(server: &MockServer, timeout: Duration) -> FaceppClient {
    FaceppClient::new(FaceppConfig {
        detect_url: format!("{}{}", server.uri(), DETECT_PATH),
        api_key: "test-key".to_string(),
        api_secret: "test-secret".to_string(),
        timeout,
    })
    .unwrap()
}

#[tokio::test]
async fn test_detect_parses_face() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .and(body_string_contains("skinstatus,gender,age"))
        .and(body_string_contains("test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-1",
            "faces": [{
                "face_rectangle": {"confidence": 0.93},
                "attributes": {
                    "gender": {"value": "Male"},
                    "age": {"value": 42},
                    "skinstatus": {"acne": 0.2, "health": 0.8, "stain": 0.1, "dark_circle": 0.4}
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let response = client.detect(b"fake-jpeg").await.unwrap();

    let face = response.primary_face().unwrap();
    assert_eq!(face.subject().gender, Gender::Male);
    assert_eq!(face.subject().age, 42);
    assert_eq!(face.confidence(), 0.93);
    assert_eq!(face.skin_scores().dark_circle, 0.4);
}

#[tokio::test]
async fn test_detect_no_face_is_empty_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-2",
            "faces": [],
            "face_num": 0
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let response = client.detect(b"landscape").await.unwrap();
    assert!(response.primary_face().is_none());
}

#[tokio::test]
async fn test_detect_server_error_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.detect(b"img").await.unwrap_err();
    assert!(matches!(err, FaceppError::ServiceUnavailable(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_detect_concurrency_limit_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error_message": "CONCURRENCY_LIMIT_EXCEEDED"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.detect(b"img").await.unwrap_err();
    assert!(matches!(err, FaceppError::ServiceUnavailable(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_detect_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_message": "INVALID_IMAGE_SIZE: image_file"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.detect(b"img").await.unwrap_err();
    match err {
        FaceppError::RequestFailed(msg) => assert!(msg.contains("INVALID_IMAGE_SIZE")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_detect_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.detect(b"img").await.unwrap_err();
    assert!(matches!(err, FaceppError::InvalidResponse(_)));
    assert!(!err.is_timeout());
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_detect_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"faces": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(200));
    let err = client.detect(b"img").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}
