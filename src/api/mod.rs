//! API layer - HTTP handlers and routing
//!
//! Every endpoint lives under `/api`. Reads are public; writes and the admin
//! listings go through `require_auth`.

pub mod auth;
pub mod blogs;
pub mod chat;
pub mod chatbot;
pub mod faqs;
pub mod messages;
pub mod middleware;
pub mod projects;
pub mod resume;
pub mod testimonials;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Build the `/api` router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Protected routes (need a valid bearer token)
    let protected_routes = Router::new()
        .nest("/auth", auth::protected_router())
        .nest("/blogs", blogs::protected_router())
        .nest("/admin/blogs", blogs::admin_router())
        .nest("/projects", projects::protected_router())
        .nest("/testimonials", testimonials::protected_router())
        .nest("/admin/testimonials", testimonials::admin_router())
        .nest("/resume", resume::protected_router())
        .nest("/messages", messages::protected_router())
        .nest("/faqs", faqs::protected_router())
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    // Public routes
    Router::new()
        .nest("/auth", auth::public_router())
        .nest("/blogs", blogs::public_router())
        .nest("/projects", projects::public_router())
        .nest("/testimonials", testimonials::public_router())
        .nest("/resume", resume::public_router())
        .nest("/messages", messages::public_router())
        .nest("/contact", messages::contact_router())
        .nest("/faqs", faqs::public_router())
        .nest("/chat", chat::router())
        .nest("/chatbot", chatbot::router())
        .merge(protected_routes)
}

/// Build the complete router with middleware
///
/// An empty `cors_origins` list allows any origin.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api", build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
