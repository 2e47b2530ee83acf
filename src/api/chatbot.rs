//! Gateway chatbot endpoints
//!
//! - POST /api/chatbot/chat - Answer with conversation history
//! - GET /api/chatbot/suggested-questions
//! - GET /api/chatbot/faq

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState};
use crate::services::{ChatError, ChatMessage, FaqEntry, GatewayReply};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct FaqResponse {
    pub faq: Vec<FaqEntry>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/suggested-questions", get(suggested_questions))
        .route("/faq", get(faq))
}

async fn chat(
    State(state): State<AppState>,
    Json(body): Json<GatewayChatRequest>,
) -> Result<Json<GatewayReply>, ApiError> {
    state
        .chat_service
        .gateway_reply(&body.message, &body.conversation_history)
        .await
        .map(Json)
        .map_err(|e| match e {
            ChatError::EmptyMessage => ApiError::validation_error("Message is required"),
            ChatError::NotConfigured => ApiError::service_unavailable("AI service not configured")
                .with_message("Please add GEMINI_API_KEY to environment variables"),
            other => {
                tracing::error!("Chatbot error: {}", other);
                ApiError::internal_error("Failed to get AI response").with_message(other.to_string())
            }
        })
}

async fn suggested_questions(State(state): State<AppState>) -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: state.chat_service.suggested_questions(),
    })
}

async fn faq(State(state): State<AppState>) -> Json<FaqResponse> {
    Json(FaqResponse {
        faq: state.chat_service.faq(),
    })
}
