//! API middleware
//!
//! Contains the shared application state, the JSON error type every handler
//! returns, and the bearer-token authentication middleware.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::db::DynDatabasePool;
use crate::services::{
    AppServices, AuthService, BlogService, ChatService, ContentError, FaqService, MessageService,
    ProjectService, ResumeService, TestimonialService,
};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub auth_service: Arc<AuthService>,
    pub blog_service: Arc<BlogService>,
    pub project_service: Arc<ProjectService>,
    pub testimonial_service: Arc<TestimonialService>,
    pub resume_service: Arc<ResumeService>,
    pub message_service: Arc<MessageService>,
    pub faq_service: Arc<FaqService>,
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    pub fn new(pool: DynDatabasePool, services: AppServices) -> Self {
        Self {
            pool,
            auth_service: services.auth_service,
            blog_service: services.blog_service,
            project_service: services.project_service,
            testimonial_service: services.testimonial_service,
            resume_service: services.resume_service,
            message_service: services.message_service,
            faq_service: services.faq_service,
            chat_service: services.chat_service,
        }
    }
}

/// Id of the user the bearer token was issued to
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

/// API error response
///
/// Renders as `{"error": "..."}`, plus `"message"` when there is more to say.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                error: error.into(),
                message: None,
            },
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    pub fn validation_error(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn conflict(error: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, error)
    }

    pub fn service_unavailable(error: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, error)
    }

    pub fn internal_error(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Map a content service error, replacing internal failures with `fallback`.
    ///
    /// ```ignore
    /// state.blog_service.list_published().await.map_err(ApiError::content("Error fetching blogs"))?
    /// ```
    pub fn content(fallback: &'static str) -> impl FnOnce(ContentError) -> ApiError {
        move |err| match err {
            ContentError::NotFound(entity) => Self::not_found(format!("{} not found", entity)),
            ContentError::Validation(message) => Self::validation_error(message),
            ContentError::Conflict(message) => Self::conflict(message),
            ContentError::Internal(e) => {
                tracing::error!("{}: {:#}", fallback, e);
                Self::internal_error(fallback)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Extract the bearer token from the Authorization header
///
/// The scheme name is matched case-insensitively.
fn extract_bearer_token(request: &Request) -> Option<&str> {
    let value = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|token| !token.is_empty())
}

/// Authentication middleware
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&request)
        .ok_or_else(|| ApiError::unauthorized("No token provided"))?;

    let user_id = state
        .auth_service
        .authenticate(token)
        .map_err(|_| ApiError::unauthorized("Invalid token"))?;

    request.extensions_mut().insert(AuthenticatedUser(user_id));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_error_mapping() {
        let err = ApiError::content("Error fetching blogs")(ContentError::NotFound("Blog"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body.error, "Blog not found");

        let err = ApiError::content("x")(ContentError::Validation("Title is required".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body.error, "Title is required");

        let err = ApiError::content("x")(ContentError::Conflict("taken".into()));
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = ApiError::content("Error creating blog")(ContentError::Internal(
            anyhow::anyhow!("disk full"),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.error, "Error creating blog");
    }

    fn request_with_auth(value: &str) -> Request {
        Request::builder()
            .header(header::AUTHORIZATION, value)
            .body(axum::body::Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(&request_with_auth("Bearer abc")), Some("abc"));
        assert_eq!(extract_bearer_token(&request_with_auth("bearer abc")), Some("abc"));
        assert_eq!(extract_bearer_token(&request_with_auth("BEARER   abc ")), Some("abc"));
        assert_eq!(extract_bearer_token(&request_with_auth("Bearer")), None);
        assert_eq!(extract_bearer_token(&request_with_auth("Bearer   ")), None);
        assert_eq!(extract_bearer_token(&request_with_auth("Basic abc")), None);

        let bare = Request::builder().body(axum::body::Body::empty()).unwrap();
        assert_eq!(extract_bearer_token(&bare), None);
    }

    #[test]
    fn test_error_body_shape() {
        let err = ApiError::service_unavailable("AI service not configured")
            .with_message("Please add GEMINI_API_KEY to environment variables");
        let value = serde_json::to_value(&err.body).unwrap();
        assert_eq!(value["error"], "AI service not configured");
        assert_eq!(
            value["message"],
            "Please add GEMINI_API_KEY to environment variables"
        );

        let value = serde_json::to_value(&ApiError::unauthorized("No token provided").body).unwrap();
        assert!(value.get("message").is_none());
    }
}
