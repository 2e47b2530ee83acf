//! Testimonial API endpoints
//!
//! The public listing only shows featured testimonials; the admin listing
//! at /api/admin/testimonials shows all of them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateTestimonialInput, Testimonial, UpdateTestimonialInput};

pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(list_featured))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_testimonial))
        .route("/{id}", put(update_testimonial).delete(delete_testimonial))
}

pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", get(list_all))
}

async fn list_featured(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let testimonials = state
        .testimonial_service
        .list_featured()
        .await
        .map_err(ApiError::content("Error fetching testimonials"))?;
    Ok(Json(testimonials))
}

async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let testimonials = state
        .testimonial_service
        .list_all()
        .await
        .map_err(ApiError::content("Error fetching testimonials"))?;
    Ok(Json(testimonials))
}

async fn create_testimonial(
    State(state): State<AppState>,
    Json(input): Json<CreateTestimonialInput>,
) -> Result<(StatusCode, Json<Testimonial>), ApiError> {
    let testimonial = state
        .testimonial_service
        .create(input)
        .await
        .map_err(ApiError::content("Error creating testimonial"))?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

async fn update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTestimonialInput>,
) -> Result<Json<Testimonial>, ApiError> {
    let testimonial = state
        .testimonial_service
        .update(&id, input)
        .await
        .map_err(ApiError::content("Error updating testimonial"))?;
    Ok(Json(testimonial))
}

async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .testimonial_service
        .delete(&id)
        .await
        .map_err(ApiError::content("Error deleting testimonial"))?;
    Ok(StatusCode::NO_CONTENT)
}
