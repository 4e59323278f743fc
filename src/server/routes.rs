//! HTTP route handlers for the voxrelay agent API.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::conversation::{ConversationError, SessionId};

use super::state::AppState;

/// Header carrying the caller's session token.
pub const SESSION_HEADER: &str = "x-session-id";

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/api/voice/ask", post(voice_ask))
        .route("/api/voice/clear", post(voice_clear))
        .with_state(state)
}

/// Root endpoint.
async fn home() -> impl IntoResponse {
    "Voice Agent API is running."
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "voxrelay-agent",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ask request.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The user's prompt.
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Ask response.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// The assistant's reply.
    pub response: String,
}

/// Clear response.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    /// Outcome marker.
    pub status: String,
}

/// API error rendered as a JSON `{"error": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Client-side validation failure (HTTP 400).
    Validation(String),
    /// Unexpected internal failure (HTTP 500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ConversationError> for ApiError {
    fn from(err: ConversationError) -> Self {
        match err {
            ConversationError::EmptyPrompt => Self::Validation("Prompt is required".to_owned()),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Handle ask requests.
///
/// The body is parsed leniently: an absent, non-JSON, or promptless body all
/// surface as the same "Prompt is required" validation error.
async fn voice_ask(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AskResponse>, ApiError> {
    let session = session_from_headers(&headers);
    let prompt = serde_json::from_slice::<AskRequest>(&body)
        .ok()
        .and_then(|request| request.prompt)
        .unwrap_or_default();

    let response = state.manager.ask(&session, &prompt).await?;

    Ok(Json(AskResponse { response }))
}

/// Handle clear requests.
async fn voice_clear(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ClearResponse>, ApiError> {
    let session = session_from_headers(&headers);
    state.manager.clear(&session).await?;

    Ok(Json(ClearResponse {
        status: "conversation cleared".to_owned(),
    }))
}

/// Resolve the caller's session from request headers. Absent or invalid
/// tokens map to the shared anonymous session.
fn session_from_headers(headers: &HeaderMap) -> SessionId {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|token| SessionId::new(token).ok())
        .unwrap_or_else(SessionId::anonymous)
}
