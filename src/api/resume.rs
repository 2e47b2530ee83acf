//! Resume metadata endpoints

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateResumeInput, Resume};

pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(latest_resume))
}

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/", post(create_resume))
}

/// Latest resume, or `null` when none was uploaded
async fn latest_resume(State(state): State<AppState>) -> Result<Json<Option<Resume>>, ApiError> {
    let resume = state
        .resume_service
        .latest()
        .await
        .map_err(ApiError::content("Error fetching resume"))?;
    Ok(Json(resume))
}

async fn create_resume(
    State(state): State<AppState>,
    Json(input): Json<CreateResumeInput>,
) -> Result<(StatusCode, Json<Resume>), ApiError> {
    let resume = state
        .resume_service
        .create(input)
        .await
        .map_err(ApiError::content("Error saving resume metadata"))?;
    Ok((StatusCode::CREATED, Json(resume)))
}
