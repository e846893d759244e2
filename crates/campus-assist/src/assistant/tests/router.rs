use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::application::ApplicationStore;

fn post_json(uri: &str, payload: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn chat_route_answers_with_the_dialog_reply() {
    let (router, _store) = router_with_state(
        Some(recognition("Fees", 0.9, "The application fee is R500.")),
        "unused",
    );

    let response = router
        .oneshot(post_json(
            "/api/v1/chat",
            json!({ "message": "what are the fees?" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["response"], json!("The application fee is R500."));
    assert_eq!(payload["used_fallback"], json!(false));
}

#[tokio::test]
async fn chat_route_rejects_empty_messages() {
    let (router, _store) = router_with_state(None, "unused");

    let response = router
        .oneshot(post_json("/api/v1/chat", json!({ "message": "  " })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
}

#[tokio::test]
async fn upload_route_verifies_and_reports_the_analysis() {
    let (router, store) = router_with_state(None, "unused");
    let document = BASE64.encode("REPUBLIC OF SOUTH AFRICA\nIdentity Number 9001\nJOHN STUDENT");

    let response = router
        .oneshot(post_json(
            "/api/v1/documents",
            json!({
                "file_name": "sa_id_card.jpg",
                "file_data": document,
                "user_name": "John Student",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["name_verified"], json!(true));
    assert_eq!(
        payload["analysis"]["detected_type"],
        json!("South African Identity Document")
    );

    let record = store
        .fetch("John Student")
        .expect("fetch works")
        .expect("seeded record updated");
    assert!(record.progress >= 25);
}

#[tokio::test]
async fn upload_route_requires_name_and_payload() {
    let (router, _store) = router_with_state(None, "unused");

    let response = router
        .oneshot(post_json(
            "/api/v1/documents",
            json!({ "file_name": "id.jpg", "file_data": "", "user_name": "" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_route_treats_bad_encoding_as_degraded_success() {
    let (router, _store) = router_with_state(None, "unused");

    let response = router
        .oneshot(post_json(
            "/api/v1/documents",
            json!({
                "file_name": "id.jpg",
                "file_data": "%%%not-base64%%%",
                "user_name": "John Student",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
    assert_eq!(payload["response"], json!("Invalid file format"));
}

#[tokio::test]
async fn rejected_uploads_return_the_required_documents_checklist() {
    let (router, _store) = router_with_state(None, "unused");
    let document = BASE64.encode("Bank Statement for Account Holder: Mark Smith");

    let response = router
        .oneshot(post_json(
            "/api/v1/documents",
            json!({
                "file_name": "statement.pdf",
                "file_data": document,
                "user_name": "Jane Doe",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
    assert_eq!(payload["name_verified"], json!(false));
    assert!(payload["required_documents"]["identity"].is_array());
}

#[tokio::test]
async fn status_route_renders_seeded_records() {
    let (router, _store) = router_with_state(None, "unused");

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/applications/John%20Student/status")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["status"], json!("Under Review"));
    assert_eq!(payload["progress"], json!(75));
}

#[tokio::test]
async fn status_route_degrades_for_unknown_students() {
    let (router, _store) = router_with_state(None, "unused");

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/applications/Nobody/status")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert!(payload["response"]
        .as_str()
        .unwrap_or_default()
        .contains("No application found"));
}
