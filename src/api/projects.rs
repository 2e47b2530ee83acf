//! Project API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateProjectInput, Project, UpdateProjectInput};

pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(list_projects))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_project))
        .route("/{id}", put(update_project).delete(delete_project))
}

async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state
        .project_service
        .list()
        .await
        .map_err(ApiError::content("Error fetching projects"))?;
    Ok(Json(projects))
}

async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let project = state
        .project_service
        .create(input)
        .await
        .map_err(ApiError::content("Error creating project"))?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProjectInput>,
) -> Result<Json<Project>, ApiError> {
    let project = state
        .project_service
        .update(&id, input)
        .await
        .map_err(ApiError::content("Error updating project"))?;
    Ok(Json(project))
}

async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .project_service
        .delete(&id)
        .await
        .map_err(ApiError::content("Error deleting project"))?;
    Ok(StatusCode::NO_CONTENT)
}
