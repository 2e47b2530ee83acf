//! Blog API endpoints
//!
//! - GET /api/blogs - Published posts, newest first
//! - GET /api/blogs/{slug} - One post by slug
//! - POST /api/blogs, PUT/DELETE /api/blogs/{id} - Admin writes
//! - GET /api/admin/blogs - Every post including drafts

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{Blog, CreateBlogInput, UpdateBlogInput};

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogs))
        .route("/{id}", get(get_blog))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_blog))
        .route("/{id}", put(update_blog).delete(delete_blog))
}

pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", get(list_all_blogs))
}

async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, ApiError> {
    let blogs = state
        .blog_service
        .list_published()
        .await
        .map_err(ApiError::content("Error fetching blogs"))?;
    Ok(Json(blogs))
}

async fn list_all_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, ApiError> {
    let blogs = state
        .blog_service
        .list_all()
        .await
        .map_err(ApiError::content("Error fetching blogs"))?;
    Ok(Json(blogs))
}

/// The path segment is the slug on reads and the id on writes
async fn get_blog(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Blog>, ApiError> {
    let blog = state
        .blog_service
        .get_by_slug(&slug)
        .await
        .map_err(ApiError::content("Error fetching blog"))?;
    Ok(Json(blog))
}

async fn create_blog(
    State(state): State<AppState>,
    Json(input): Json<CreateBlogInput>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    let blog = state
        .blog_service
        .create(input)
        .await
        .map_err(ApiError::content("Error creating blog"))?;
    tracing::info!("Created blog {}", blog.slug);
    Ok((StatusCode::CREATED, Json(blog)))
}

async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateBlogInput>,
) -> Result<Json<Blog>, ApiError> {
    let blog = state
        .blog_service
        .update(&id, input)
        .await
        .map_err(ApiError::content("Error updating blog"))?;
    Ok(Json(blog))
}

async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .blog_service
        .delete(&id)
        .await
        .map_err(ApiError::content("Error deleting blog"))?;
    Ok(StatusCode::NO_CONTENT)
}
