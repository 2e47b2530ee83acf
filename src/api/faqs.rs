//! FAQ endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateFaqInput, Faq};

pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(list_faqs))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_faq))
        .route("/{id}", delete(delete_faq))
}

async fn list_faqs(State(state): State<AppState>) -> Result<Json<Vec<Faq>>, ApiError> {
    let faqs = state
        .faq_service
        .list()
        .await
        .map_err(ApiError::content("Error fetching FAQs"))?;
    Ok(Json(faqs))
}

async fn create_faq(
    State(state): State<AppState>,
    Json(input): Json<CreateFaqInput>,
) -> Result<(StatusCode, Json<Faq>), ApiError> {
    let faq = state
        .faq_service
        .create(input)
        .await
        .map_err(ApiError::content("Error creating FAQ"))?;
    Ok((StatusCode::CREATED, Json(faq)))
}

async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .faq_service
        .delete(&id)
        .await
        .map_err(ApiError::content("Error deleting FAQ"))?;
    Ok(StatusCode::NO_CONTENT)
}
