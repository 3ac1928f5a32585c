//! Integration tests for the backend API client against a mock server.

mod common;

use assert_matches::assert_matches;
use common::TestBackend;
use onride::egui_app::api_client::NewNotification;
use onride::shared::ApiError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn login_accepts_every_status_casing() {
    for status in ["Ok", "OK", "ok"] {
        let backend = TestBackend::start();
        backend.mount(
            Mock::given(method("POST"))
                .and(path("/login-user"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"status": status, "data": "tok_123"})),
                ),
        );

        let token = backend.client.login("a@b.com", "pw").unwrap();
        assert_eq!(token, "tok_123");
    }
}

#[test]
fn failed_status_maps_to_backend_error() {
    let backend = TestBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/login-user"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "failed", "data": null})),
            ),
    );

    let err = backend.client.login("a@b.com", "pw").unwrap_err();
    assert_matches!(err, ApiError::Backend { .. });
    assert!(!err.is_retryable());
}

#[test]
fn http_500_maps_to_retryable_status_error() {
    let backend = TestBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/getCategory"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom")),
    );

    let err = backend.client.categories().unwrap_err();
    assert_matches!(err, ApiError::Status { code: 500, .. });
    assert!(err.is_retryable());
}

#[test]
fn ok_status_with_missing_data_is_backend_error() {
    let backend = TestBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/userdata"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"}))),
    );

    let err = backend.client.session_user("tok").unwrap_err();
    assert_matches!(err, ApiError::Backend { .. });
}

#[test]
fn request_decodes_extended_json_decimals() {
    let backend = TestBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/GetRequest/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "data": {
                    "_id": "r1",
                    "userId": "u1",
                    "status": "accepted",
                    "valor": {"$numberDecimal": "18.15"},
                    "distance": "7.25",
                    "d_latitude": -8.838333,
                    "d_longitude": "13.234444"
                }
            }))),
    );

    let request = backend.client.get_request("r1").unwrap();
    assert_eq!(request.fare_display(), "18.15");
    assert_eq!(request.distance.unwrap().value(), 7.25);
    let (lat, lon) = request.destination().unwrap();
    assert!((lat - -8.838333).abs() < 1e-9);
    assert!((lon - 13.234444).abs() < 1e-9);
}

#[test]
fn nearby_requests_sends_geo_query() {
    let backend = TestBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/requests/process"))
            .and(query_param("latitude", "-8.9"))
            .and(query_param("longitude", "13.2"))
            .and(query_param("max_km", "10"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "data": []})),
            ),
    );

    let requests = backend.client.nearby_requests(-8.9, 13.2).unwrap();
    assert!(requests.is_empty());
}

#[test]
fn accept_request_posts_accepted_status_and_driver() {
    let backend = TestBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/accepted-request"))
            .and(body_partial_json(json!({
                "requestId": "r1",
                "status": "accepted",
                "userDrive": "d1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"}))),
    );

    backend.client.accept_request("r1", "d1").unwrap();
}

#[test]
fn upload_policy_retries_through_transient_400() {
    let backend = TestBackend::start();
    // Two 400 answers, then a good one.
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/generate-upload-policy"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad policy window"))
            .up_to_n_times(2),
    );
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/generate-upload-policy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "data": {
                    "apiKey": "key",
                    "policy": "cG9saWN5",
                    "signature": "sig",
                    "path": "/uploads"
                }
            }))),
    );

    let policy = backend.client.generate_upload_policy("a@b.com").unwrap();
    assert_eq!(policy.api_key, "key");
}

#[test]
fn push_token_registration_backs_off_through_failures() {
    let backend = TestBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/api/register-token"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .up_to_n_times(2),
    );
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/api/register-token"))
            .and(body_partial_json(json!({"token": "t1", "userId": "u1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"}))),
    );

    backend.client.register_push_token("t1", "u1").unwrap();
}

#[test]
fn send_notification_posts_payload() {
    let backend = TestBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/notification"))
            .and(body_partial_json(json!({"userId": "u2", "title": "Driver arrived"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"}))),
    );

    let notification = NewNotification {
        user_id: "u2".to_string(),
        title: "Driver arrived".to_string(),
        message: "Your driver is outside".to_string(),
        created_at: "2024-05-01T12:00:00Z".to_string(),
    };
    backend.client.send_notification(&notification).unwrap();
}
