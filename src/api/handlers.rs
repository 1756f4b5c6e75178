//! API request handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::api::session::TopicMemory;
use crate::api::types::*;
use crate::rag::RagService;

pub const NO_MESSAGE: &str = "No message provided";
pub const INVALID_BODY: &str = "Invalid request body";
pub const SERVER_CRASHED: &str = "Server crashed";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub rag_service: Arc<RagService>,
    pub sessions: Arc<TopicMemory>,
}

impl AppState {
    pub fn new(rag_service: Arc<RagService>, sessions: Arc<TopicMemory>) -> Self {
        Self {
            rag_service,
            sessions,
        }
    }
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.rag_service.retriever().store().len(),
    })
}

/// Answer one chat message
///
/// A body that cannot be parsed as JSON is the caller's fault and gets
/// 400 "Invalid request body", not the 500 "Server crashed" reserved for
/// failures on our side.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        // well-formed JSON whose fields have the wrong shape
        Err(JsonRejection::JsonDataError(e)) => {
            debug!("Chat body rejected: {}", e);
            return error_response(StatusCode::BAD_REQUEST, NO_MESSAGE);
        }
        // syntax error, wrong content type or unreadable bytes
        Err(e) => {
            warn!("Chat body rejected: {}", e);
            return error_response(StatusCode::BAD_REQUEST, INVALID_BODY);
        }
    };

    let Some(message) = request.trimmed_message() else {
        return error_response(StatusCode::BAD_REQUEST, NO_MESSAGE);
    };
    info!("POST /api/chat");

    let session_id = request.session_id.as_deref();
    let remembered = match session_id {
        Some(id) if state.rag_service.detect_topic(message).is_none() => {
            state.sessions.get_topic(id)
        }
        _ => None,
    };
    if let Some(topic) = &remembered {
        debug!("Follow-up inherits session topic {}", topic);
    }

    match state.rag_service.reply(message, remembered.as_deref()).await {
        Ok(reply) => {
            if let (Some(id), Some(topic)) = (session_id, reply.detected_topic.as_deref()) {
                state.sessions.set_topic(id, topic);
            }
            Json(ChatResponse { reply: reply.reply }).into_response()
        }
        Err(e) => {
            error!("Chat request failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_CRASHED)
        }
    }
}
