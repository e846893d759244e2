use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::application::{render_status, ApplicationStore};
use crate::channel::Channel;
use crate::documents::pipeline::{DocumentIntakeService, IntakeOutcome, OcrEngine};
use crate::documents::replies::{
    accepted_reply, rejected_reply, required_documents, RequiredDocuments,
};
use crate::documents::Classification;

use super::ports::{DialogEngine, GenerativeModel};
use super::service::ConversationService;

/// Shared state for the assistant's HTTP surface.
pub struct AssistantState<D, G, O, S> {
    pub conversation: ConversationService<D, G, S>,
    pub intake: DocumentIntakeService<O, S>,
    pub store: Arc<S>,
}

/// Router builder exposing the chat, upload, and status endpoints.
pub fn assistant_router<D, G, O, S>(state: Arc<AssistantState<D, G, O, S>>) -> Router
where
    D: DialogEngine + 'static,
    G: GenerativeModel + 'static,
    O: OcrEngine + 'static,
    S: ApplicationStore + 'static,
{
    Router::new()
        .route("/api/v1/chat", post(chat_handler::<D, G, O, S>))
        .route("/api/v1/documents", post(upload_handler::<D, G, O, S>))
        .route(
            "/api/v1/applications/:full_name/status",
            get(status_handler::<D, G, O, S>),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub channel: Option<Channel>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub show_upload: bool,
    pub used_fallback: bool,
}

pub(crate) async fn chat_handler<D, G, O, S>(
    State(state): State<Arc<AssistantState<D, G, O, S>>>,
    axum::Json(request): axum::Json<ChatRequest>,
) -> Response
where
    D: DialogEngine + 'static,
    G: GenerativeModel + 'static,
    O: OcrEngine + 'static,
    S: ApplicationStore + 'static,
{
    if request.message.trim().is_empty() {
        let payload = json!({ "success": false, "response": "A message is required." });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let channel = request.channel.unwrap_or(Channel::Web);
    let session_id = request
        .session_id
        .unwrap_or_else(|| format!("web-{}", Uuid::new_v4()));

    let outcome = state.conversation.respond(
        channel,
        &session_id,
        request.user_name.as_deref(),
        &request.message,
    );

    let body = ChatResponse {
        success: true,
        response: outcome.reply,
        show_upload: outcome.show_upload,
        used_fallback: outcome.used_fallback,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_data: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub channel: Option<Channel>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub response: String,
    pub document_id: Option<Uuid>,
    pub name_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_documents: Option<RequiredDocuments>,
}

pub(crate) async fn upload_handler<D, G, O, S>(
    State(state): State<Arc<AssistantState<D, G, O, S>>>,
    axum::Json(request): axum::Json<UploadRequest>,
) -> Response
where
    D: DialogEngine + 'static,
    G: GenerativeModel + 'static,
    O: OcrEngine + 'static,
    S: ApplicationStore + 'static,
{
    if request.file_data.trim().is_empty() || request.user_name.trim().is_empty() {
        let payload = json!({
            "success": false,
            "response": "Please provide both file data and user name for verification.",
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let bytes = match BASE64.decode(request.file_data.trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            // bad encoding is a degraded outcome, not a transport error
            let body = UploadResponse {
                success: false,
                response: "Invalid file format".to_string(),
                document_id: None,
                name_verified: false,
                analysis: None,
                required_documents: None,
            };
            return (StatusCode::OK, axum::Json(body)).into_response();
        }
    };

    let channel = request.channel.unwrap_or(Channel::Web);
    let file_name = if request.file_name.trim().is_empty() {
        "document".to_string()
    } else {
        request.file_name.clone()
    };

    let outcome = state
        .intake
        .process(&request.user_name, &file_name, &bytes);

    let body = upload_response(channel, &request.user_name, &file_name, outcome);
    (StatusCode::OK, axum::Json(body)).into_response()
}

fn upload_response(
    channel: Channel,
    user_name: &str,
    file_name: &str,
    outcome: IntakeOutcome,
) -> UploadResponse {
    if outcome.verified {
        UploadResponse {
            success: true,
            response: accepted_reply(channel, user_name, file_name, &outcome),
            document_id: Some(outcome.document_id),
            name_verified: true,
            analysis: Some(outcome.classification),
            required_documents: None,
        }
    } else {
        UploadResponse {
            success: false,
            response: rejected_reply(channel, user_name, file_name, &outcome),
            document_id: None,
            name_verified: false,
            analysis: Some(outcome.classification),
            required_documents: Some(required_documents()),
        }
    }
}

pub(crate) async fn status_handler<D, G, O, S>(
    State(state): State<Arc<AssistantState<D, G, O, S>>>,
    Path(full_name): Path<String>,
) -> Response
where
    D: DialogEngine + 'static,
    G: GenerativeModel + 'static,
    O: OcrEngine + 'static,
    S: ApplicationStore + 'static,
{
    match state.store.fetch(&full_name) {
        Ok(record) => {
            let payload = json!({
                "success": true,
                "response": render_status(Channel::Web, record.as_ref()),
                "status": record.as_ref().map(|r| r.status.label()),
                "progress": record.as_ref().map(|r| r.progress),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            tracing::warn!(%err, "status endpoint could not reach the store");
            let payload = json!({
                "success": false,
                "response": "Unable to retrieve document status.",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
    }
}
