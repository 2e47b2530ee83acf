//! Authentication API endpoints
//!
//! - POST /api/auth/login - Exchange admin credentials for a bearer token
//! - GET /api/auth/me - Get the signed-in user

use axum::{extract::State, routing::{get, post}, Extension, Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::PublicUser;
use crate::services::AuthError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

pub fn public_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state
        .auth_service
        .login(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            other => {
                tracing::error!("Login error: {}", other);
                ApiError::internal_error("Server error")
            }
        })?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        user: outcome.user,
    }))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<PublicUser>, ApiError> {
    state
        .auth_service
        .current_user(&user.0)
        .await
        .map(Json)
        .map_err(|e| match e {
            AuthError::UserNotFound => ApiError::not_found("User not found"),
            other => {
                tracing::error!("Error fetching user: {}", other);
                ApiError::internal_error("Server error")
            }
        })
}
