//! Portfolio assistant endpoint (POST /api/chat)

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chat))
}

async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let reply = state
        .chat_service
        .assistant_reply(&body.message)
        .await
        .map_err(|e| {
            tracing::error!("Chat error: {}", e);
            ApiError::internal_error("Chatbot error")
        })?;
    Ok(Json(ChatResponse { reply }))
}
