//! HTTP-level tests for the `/api` router

use axum::{
    http::{header, HeaderValue, StatusCode},
    routing::post,
    Json, Router,
};
use axum_test::TestServer;
use serde_json::{json, Value};

use folio::{
    api::{build_router, AppState},
    config::Config,
    db::{create_test_pool, migrations},
    services::{seed, AppServices},
};

const ADMIN_EMAIL: &str = "admin@portfolio.com";
const ADMIN_PASSWORD: &str = "admin123";

async fn server_with(config: Config) -> TestServer {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let services = AppServices::build(&config, pool.clone()).expect("Failed to build services");
    seed::seed_defaults(&services, &config.auth).await;

    let app = build_router(AppState::new(pool, services), &config.server.cors_origins);
    TestServer::new(app).unwrap()
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = Some("integration-test-secret".to_string());
    config
}

async fn server() -> TestServer {
    server_with(test_config()).await
}

async fn login(server: &TestServer) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()["token"]
        .as_str()
        .expect("login returns a token")
        .to_string()
}

fn header_value(value: String) -> HeaderValue {
    HeaderValue::from_str(&value).unwrap()
}

/// Serve `router` on an ephemeral port and return its base URL
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn provider(status: StatusCode, content: &'static str) -> Router {
    Router::new().route(
        "/chat/completions",
        post(move || async move {
            (status, Json(json!({ "choices": [{ "message": { "content": content } }] })))
        }),
    )
}

#[tokio::test]
async fn test_login_and_me() {
    let server = server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    let token = body["token"].as_str().unwrap();
    let me = server.get("/api/auth/me").authorization_bearer(token).await;
    assert_eq!(me.status_code(), StatusCode::OK);
    assert_eq!(me.json::<Value>()["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let server = server().await;

    for (email, password) in [(ADMIN_EMAIL, "wrong"), ("nobody@example.com", ADMIN_PASSWORD)] {
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>(), json!({ "error": "Invalid credentials" }));
    }
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = server().await;

    let response = server
        .post("/api/projects")
        .json(&json!({ "title": "t", "description": "d" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "error": "No token provided" }));

    let response = server
        .get("/api/messages")
        .authorization_bearer("not.a.token")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "error": "Invalid token" }));

    // Token signed with another secret
    let mut other = test_config();
    other.auth.jwt_secret = Some("another-secret".to_string());
    let other_server = server_with(other).await;
    let foreign_token = login(&other_server).await;
    let response = server
        .get("/api/admin/blogs")
        .authorization_bearer(&foreign_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // Nothing was written by the rejected request
    let projects = server.get("/api/projects").await.json::<Value>();
    assert_eq!(projects, json!([]));
}

#[tokio::test]
async fn test_blog_lifecycle() {
    let server = server().await;
    let token = login(&server).await;

    let created = server
        .post("/api/blogs")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "First post",
            "slug": "first-post",
            "content": "<p>Hello</p>",
            "excerpt": "Hello"
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let blog = created.json::<Value>();
    assert_eq!(blog["published"], true);
    let id = blog["id"].as_str().unwrap().to_string();

    let fetched = server.get("/api/blogs/first-post").await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>()["title"], "First post");

    let duplicate = server
        .post("/api/blogs")
        .authorization_bearer(&token)
        .json(&json!({ "title": "Again", "slug": "first-post", "content": "x" }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let updated = server
        .put(&format!("/api/blogs/{}", id))
        .authorization_bearer(&token)
        .json(&json!({ "title": "Renamed", "published": false }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(updated.json::<Value>()["title"], "Renamed");

    // Drafts are hidden from the public listing but not from the admin one
    assert_eq!(server.get("/api/blogs").await.json::<Value>(), json!([]));
    let all = server
        .get("/api/admin/blogs")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(all.as_array().unwrap().len(), 1);

    let deleted = server
        .delete(&format!("/api/blogs/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let missing = server.get("/api/blogs/first-post").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>(), json!({ "error": "Blog not found" }));

    let again = server
        .delete(&format!("/api/blogs/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blog_validation() {
    let server = server().await;
    let token = login(&server).await;

    let response = server
        .post("/api/blogs")
        .authorization_bearer(&token)
        .json(&json!({ "title": "No slug" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Title, slug and content are required" })
    );
}

#[tokio::test]
async fn test_update_with_null_clears_optional_fields() {
    let server = server().await;
    let token = login(&server).await;

    let blog = server
        .post("/api/blogs")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "Covered",
            "slug": "covered",
            "content": "x",
            "excerpt": "Short",
            "coverImage": "http://img"
        }))
        .await
        .json::<Value>();

    let updated = server
        .put(&format!("/api/blogs/{}", blog["id"].as_str().unwrap()))
        .authorization_bearer(&token)
        .json(&json!({ "coverImage": null }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(updated.json::<Value>()["coverImage"], Value::Null);

    let fetched = server.get("/api/blogs/covered").await.json::<Value>();
    assert_eq!(fetched["coverImage"], Value::Null);
    assert_eq!(fetched["excerpt"], "Short");

    let project = server
        .post("/api/projects")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "Site",
            "description": "d",
            "technologies": "Rust",
            "liveUrl": "https://example.com",
            "githubUrl": "https://github.com/example/site"
        }))
        .await
        .json::<Value>();

    let updated = server
        .put(&format!("/api/projects/{}", project["id"].as_str().unwrap()))
        .authorization_bearer(&token)
        .json(&json!({ "liveUrl": null }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);

    let listed = server.get("/api/projects").await.json::<Value>();
    assert_eq!(listed[0]["liveUrl"], Value::Null);
    assert_eq!(listed[0]["githubUrl"], "https://github.com/example/site");
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let server = server().await;
    let token = login(&server).await;

    let response = server
        .get("/api/messages")
        .add_header(header::AUTHORIZATION, header_value(format!("bearer {}", token)))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get("/api/auth/me")
        .add_header(header::AUTHORIZATION, header_value(format!("BEARER  {}", token)))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get("/api/messages")
        .add_header(header::AUTHORIZATION, header_value(format!("Basic {}", token)))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_published_blogs_newest_first() {
    let server = server().await;
    let token = login(&server).await;

    for slug in ["older", "draft", "newer"] {
        server
            .post("/api/blogs")
            .authorization_bearer(&token)
            .json(&json!({
                "title": slug,
                "slug": slug,
                "content": "body",
                "published": slug != "draft"
            }))
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let blogs = server.get("/api/blogs").await.json::<Value>();
    let slugs: Vec<&str> = blogs
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["newer", "older"]);
}

#[tokio::test]
async fn test_project_lifecycle() {
    let server = server().await;
    let token = login(&server).await;

    let created = server
        .post("/api/projects")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "Grocery",
            "description": "A shop",
            "technologies": "Rust, Axum",
            "liveUrl": "https://example.com"
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let project = created.json::<Value>();
    assert_eq!(project["liveUrl"], "https://example.com");
    let id = project["id"].as_str().unwrap().to_string();

    let updated = server
        .put(&format!("/api/projects/{}", id))
        .authorization_bearer(&token)
        .json(&json!({ "description": "A bigger shop" }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let updated = updated.json::<Value>();
    assert_eq!(updated["description"], "A bigger shop");
    assert_eq!(updated["title"], "Grocery");

    let missing = server
        .put("/api/projects/does-not-exist")
        .authorization_bearer(&token)
        .json(&json!({ "title": "x" }))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>(), json!({ "error": "Project not found" }));

    let deleted = server
        .delete(&format!("/api/projects/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(server.get("/api/projects").await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_testimonials_featured_and_admin_listing() {
    let server = server().await;
    let token = login(&server).await;

    let featured = server
        .post("/api/testimonials")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Jane", "content": "Great work", "rating": 9 }))
        .await;
    assert_eq!(featured.status_code(), StatusCode::CREATED);
    assert_eq!(featured.json::<Value>()["rating"], 5);

    server
        .post("/api/testimonials")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Hidden", "content": "Meh", "isFeatured": false }))
        .await;

    let public = server.get("/api/testimonials").await.json::<Value>();
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["name"], "Jane");

    let all = server
        .get("/api/admin/testimonials")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_resume_latest() {
    let server = server().await;
    let token = login(&server).await;

    assert_eq!(server.get("/api/resume").await.json::<Value>(), Value::Null);

    let missing_url = server
        .post("/api/resume")
        .authorization_bearer(&token)
        .json(&json!({ "fileName": "cv.pdf" }))
        .await;
    assert_eq!(missing_url.status_code(), StatusCode::BAD_REQUEST);

    for url in ["/files/old.pdf", "/files/new.pdf"] {
        let response = server
            .post("/api/resume")
            .authorization_bearer(&token)
            .json(&json!({ "fileUrl": url, "role": "Engineer" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let latest = server.get("/api/resume").await.json::<Value>();
    assert_eq!(latest["fileUrl"], "/files/new.pdf");
}

#[tokio::test]
async fn test_contact_flow() {
    let server = server().await;
    let token = login(&server).await;

    let sent = server
        .post("/api/contact")
        .json(&json!({ "name": "Visitor", "email": "v@example.com", "message": "Hello there" }))
        .await;
    assert_eq!(sent.status_code(), StatusCode::CREATED);
    assert_eq!(sent.json::<Value>(), json!({ "message": "Message sent successfully" }));

    let incomplete = server
        .post("/api/messages")
        .json(&json!({ "name": "Visitor" }))
        .await;
    assert_eq!(incomplete.status_code(), StatusCode::BAD_REQUEST);

    let inbox = server
        .get("/api/messages")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(inbox[0]["read"], false);
    let id = inbox[0]["id"].as_str().unwrap().to_string();

    let read = server
        .patch(&format!("/api/messages/{}/read", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(read.status_code(), StatusCode::OK);
    assert_eq!(read.json::<Value>()["read"], true);

    let deleted = server
        .delete(&format!("/api/messages/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_faqs_seeded_and_managed() {
    let server = server().await;
    let token = login(&server).await;

    let faqs = server.get("/api/faqs").await.json::<Value>();
    assert_eq!(faqs.as_array().unwrap().len(), 6);

    let created = server
        .post("/api/faqs")
        .authorization_bearer(&token)
        .json(&json!({ "question": "Remote?", "answer": "Yes" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    let deleted = server
        .delete(&format!("/api/faqs/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(server.get("/api/faqs").await.json::<Value>().as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_chat_without_key_is_canned() {
    let server = server().await;

    let first = server.post("/api/chat").json(&json!({ "message": "Who are you?" })).await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let second = server.post("/api/chat").json(&json!({ "message": "Projects?" })).await;

    let first = first.json::<Value>();
    assert!(first["reply"].as_str().unwrap().contains("portfolio assistant"));
    assert_eq!(first, second.json::<Value>());
}

#[tokio::test]
async fn test_chat_provider_failure_is_500() {
    let base = spawn(provider(StatusCode::INTERNAL_SERVER_ERROR, "")).await;
    let mut config = test_config();
    config.assistant.api_key = Some("sk-test".to_string());
    config.assistant.base_url = base;
    let server = server_with(config).await;

    let response = server.post("/api/chat").json(&json!({ "message": "hi" })).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "Chatbot error" }));
}

#[tokio::test]
async fn test_chatbot_validation_and_configuration() {
    let server = server().await;

    let empty = server.post("/api/chatbot/chat").json(&json!({ "message": "  " })).await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(empty.json::<Value>(), json!({ "error": "Message is required" }));

    let unconfigured = server.post("/api/chatbot/chat").json(&json!({ "message": "hi" })).await;
    assert_eq!(unconfigured.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        unconfigured.json::<Value>(),
        json!({
            "error": "AI service not configured",
            "message": "Please add GEMINI_API_KEY to environment variables"
        })
    );
}

#[tokio::test]
async fn test_chatbot_gateway_reply() {
    let base = spawn(provider(StatusCode::OK, "Hello from the gateway")).await;
    let mut config = test_config();
    config.chatbot.api_key = Some("or-key".to_string());
    config.chatbot.gateway_url = format!("{}/chat/completions", base);
    let server = server_with(config).await;

    let response = server
        .post("/api/chatbot/chat")
        .json(&json!({
            "message": "What do you build?",
            "conversationHistory": [
                { "role": "user", "content": "Hi" },
                { "role": "assistant", "content": "Hello!" }
            ]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["reply"], "Hello from the gateway");
    assert_eq!(body["model"], "gemini-2.0-flash-exp");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_chatbot_rejected_key_goes_offline() {
    let base = spawn(provider(StatusCode::UNAUTHORIZED, "")).await;
    let mut config = test_config();
    config.chatbot.api_key = Some("or-revoked".to_string());
    config.chatbot.gateway_url = format!("{}/chat/completions", base);
    let server = server_with(config).await;

    let response = server.post("/api/chatbot/chat").json(&json!({ "message": "hi" })).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert!(body["reply"].as_str().unwrap().starts_with("(Offline Mode)"));
    assert!(body.get("model").is_none());
}

#[tokio::test]
async fn test_chatbot_static_lists() {
    let server = server().await;

    let questions = server.get("/api/chatbot/suggested-questions").await.json::<Value>();
    assert_eq!(questions["questions"].as_array().unwrap().len(), 10);

    let faq = server.get("/api/chatbot/faq").await.json::<Value>();
    let faq = faq["faq"].as_array().unwrap();
    assert_eq!(faq.len(), 4);
    assert!(faq[0]["question"].is_string());
    assert!(faq[0]["answer"].is_string());
}
