use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Form, Json, Router};
use campus_assist::accounts::{login, register, AccountError, RegistrationRequest};
use campus_assist::assistant::{assistant_router, MediaFetcher};
use campus_assist::channel::Channel;
use campus_assist::documents::{accepted_reply, rejected_reply};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::infra::{AppState, InMemoryAccountDirectory, Services};

pub(crate) struct WebhookState<M> {
    pub(crate) services: Arc<Services>,
    pub(crate) media: Arc<M>,
}

pub(crate) fn with_assistant_routes<M>(
    services: Arc<Services>,
    directory: Arc<InMemoryAccountDirectory>,
    media: Arc<M>,
) -> Router
where
    M: MediaFetcher + 'static,
{
    let webhook_state = Arc::new(WebhookState {
        services: services.clone(),
        media,
    });

    assistant_router(services)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .merge(
            Router::new()
                .route("/api/v1/auth", post(auth_endpoint))
                .with_state(directory),
        )
        .merge(
            Router::new()
                .route(
                    "/webhook/messaging",
                    get(webhook_probe).post(messaging_webhook::<M>),
                )
                .with_state(webhook_state),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthRequest {
    #[serde(default)]
    pub(crate) action: String,
    #[serde(default)]
    pub(crate) student_id: String,
    #[serde(default)]
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) email: String,
}

pub(crate) async fn auth_endpoint(
    State(directory): State<Arc<InMemoryAccountDirectory>>,
    Json(request): Json<AuthRequest>,
) -> Response {
    match request.action.as_str() {
        "login" => login_response(&directory, &request),
        "register" => register_response(&directory, request),
        _ => {
            let payload = json!({ "success": false, "message": "Invalid action" });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

fn login_response(directory: &InMemoryAccountDirectory, request: &AuthRequest) -> Response {
    match login(directory, &request.student_id, &request.password) {
        Ok(profile) => {
            let payload = json!({
                "success": true,
                "user": {
                    "studentId": profile.student_id,
                    "fullName": profile.full_name,
                    "email": profile.email,
                },
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(AccountError::MissingFields) => {
            let payload = json!({
                "success": false,
                "message": "Student ID and password required",
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(AccountError::InvalidCredentials) => {
            let payload = json!({
                "success": false,
                "message": "Invalid Student ID or password",
            });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        }
        Err(err) => {
            warn!(%err, "login failed");
            let payload = json!({ "success": false, "message": "Login failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn register_response(directory: &InMemoryAccountDirectory, request: AuthRequest) -> Response {
    let registration = RegistrationRequest {
        student_id: request.student_id,
        full_name: request.name,
        email: request.email,
        password: request.password,
    };

    match register(directory, registration) {
        Ok(profile) => {
            let payload = json!({
                "success": true,
                "studentId": profile.student_id,
                "message": "Registration successful",
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(AccountError::MissingFields) => {
            let payload = json!({ "success": false, "message": "All fields are required" });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(AccountError::Duplicate) => {
            let payload = json!({ "success": false, "message": "Student ID already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(err) => {
            warn!(%err, "registration failed");
            let payload = json!({ "success": false, "message": "Registration failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Transport-agnostic inbound message webhook: form-encoded text plus
/// optional media references, answered with an XML message envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct WebhookParams {
    #[serde(rename = "From", default)]
    pub(crate) from: String,
    #[serde(rename = "Body", default)]
    pub(crate) body: String,
    #[serde(rename = "NumMedia", default)]
    pub(crate) num_media: Option<String>,
    #[serde(rename = "MediaUrl0", default)]
    pub(crate) media_url: Option<String>,
    #[serde(rename = "MediaContentType0", default)]
    pub(crate) media_content_type: Option<String>,
    #[serde(rename = "ProfileName", default)]
    pub(crate) profile_name: Option<String>,
}

pub(crate) async fn webhook_probe() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        "Campus assistant messaging webhook active",
    )
}

pub(crate) async fn messaging_webhook<M>(
    State(state): State<Arc<WebhookState<M>>>,
    Form(params): Form<WebhookParams>,
) -> Response
where
    M: MediaFetcher + 'static,
{
    let num_media: u32 = params
        .num_media
        .as_deref()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0);

    let reply = if num_media > 0 {
        handle_webhook_media(&state, &params)
    } else {
        state
            .services
            .conversation
            .respond(Channel::WhatsApp, &params.from, None, &params.body)
            .reply
    };

    xml_reply(&reply)
}

fn handle_webhook_media<M: MediaFetcher>(
    state: &WebhookState<M>,
    params: &WebhookParams,
) -> String {
    let Some(media_url) = params.media_url.as_deref().filter(|url| !url.is_empty()) else {
        return "❌ No document received. Please try uploading again.".to_string();
    };

    if !media_is_supported(params.media_content_type.as_deref(), media_url) {
        return "❌ Please upload images (JPG, PNG) or PDF files only.".to_string();
    }

    let bytes = match state.media.download(media_url) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return download_failed_reply(),
        Err(err) => {
            warn!(%err, "media download failed");
            return download_failed_reply();
        }
    };

    let claimed_name = params
        .profile_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("Student");
    let document_name = format!("Document_{}", Local::now().format("%Y%m%d_%H%M%S"));

    let outcome = state
        .services
        .intake
        .process(claimed_name, &document_name, &bytes);

    if outcome.verified {
        accepted_reply(Channel::WhatsApp, claimed_name, &document_name, &outcome)
    } else {
        rejected_reply(Channel::WhatsApp, claimed_name, &document_name, &outcome)
    }
}

fn media_is_supported(content_type: Option<&str>, url: &str) -> bool {
    let declared = content_type.unwrap_or("").to_ascii_lowercase();
    if !declared.is_empty() {
        return declared.contains("image") || declared.contains("pdf");
    }

    mime_guess::from_path(url).iter().any(|mime| {
        mime.type_() == mime_guess::mime::IMAGE || mime == mime_guess::mime::APPLICATION_PDF
    })
}

fn download_failed_reply() -> String {
    "❌ Document download failed.\n\n\
     Could not access your document. This might be because:\n\
     • the media transport is not configured\n\
     • the document link expired\n\n\
     Please use the web portal to upload your documents instead."
        .to_string()
}

fn xml_reply(message: &str) -> Response {
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response>\n    <Message>{}</Message>\n</Response>",
        xml_escape(message)
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        body,
    )
        .into_response()
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
