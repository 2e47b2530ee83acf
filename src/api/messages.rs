//! Contact message endpoints
//!
//! - POST /api/messages, POST /api/contact - Public contact form
//! - GET /api/messages - Inbox, newest first
//! - PATCH /api/messages/{id}/read - Mark as read
//! - DELETE /api/messages/{id}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::{ContactInput, Message};

#[derive(Debug, Serialize)]
pub struct SentResponse {
    pub message: &'static str,
}

pub fn public_router() -> Router<AppState> {
    Router::new().route("/", post(send_message))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages))
        .route("/{id}/read", patch(mark_read))
        .route("/{id}", delete(delete_message))
}

/// Mounted at /api/contact
pub fn contact_router() -> Router<AppState> {
    public_router()
}

async fn send_message(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> Result<(StatusCode, Json<SentResponse>), ApiError> {
    state
        .message_service
        .submit(input)
        .await
        .map_err(ApiError::content("Error sending message"))?;
    Ok((
        StatusCode::CREATED,
        Json(SentResponse {
            message: "Message sent successfully",
        }),
    ))
}

async fn list_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state
        .message_service
        .list()
        .await
        .map_err(ApiError::content("Error fetching messages"))?;
    Ok(Json(messages))
}

async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let message = state
        .message_service
        .mark_read(&id)
        .await
        .map_err(ApiError::content("Error updating message"))?;
    Ok(Json(message))
}

async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .message_service
        .delete(&id)
        .await
        .map_err(ApiError::content("Error deleting message"))?;
    Ok(StatusCode::NO_CONTENT)
}
