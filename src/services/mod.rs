//! Services layer - Business logic
//!
//! Services sit between the HTTP handlers and the repositories. They own
//! validation, the fixed error taxonomy the API maps to status codes, and
//! every outbound call (SMTP, LLM providers).

pub mod auth;
pub mod blog;
pub mod chat;
pub mod content;
pub mod email;
pub mod faq;
pub mod llm;
pub mod message;
pub mod password;
pub mod project;
pub mod prompt;
pub mod resume;
pub mod seed;
pub mod testimonial;
pub mod token;

pub use auth::{AuthError, AuthService, LoginOutcome};
pub use blog::BlogService;
pub use chat::{ChatError, ChatService, FaqEntry, GatewayReply, SnapshotSources};
pub use content::ContentError;
pub use email::NotificationMailer;
pub use faq::{FaqService, DEFAULT_FAQS};
pub use llm::{ChatCompletionClient, ChatMessage, LlmError, Role};
pub use message::MessageService;
pub use password::{hash_password, verify_password};
pub use project::ProjectService;
pub use resume::ResumeService;
pub use testimonial::TestimonialService;
pub use token::{Claims, TokenError, TokenSigner};

use crate::config::Config;
use crate::db::repositories::{
    SqlxBlogRepository, SqlxFaqRepository, SqlxMessageRepository, SqlxProjectRepository,
    SqlxResumeRepository, SqlxTestimonialRepository, SqlxUserRepository,
};
use crate::db::DynDatabasePool;
use std::sync::Arc;

/// Every service the application needs, wired to one database pool
#[derive(Clone)]
pub struct AppServices {
    pub auth_service: Arc<AuthService>,
    pub blog_service: Arc<BlogService>,
    pub project_service: Arc<ProjectService>,
    pub testimonial_service: Arc<TestimonialService>,
    pub resume_service: Arc<ResumeService>,
    pub message_service: Arc<MessageService>,
    pub faq_service: Arc<FaqService>,
    pub chat_service: Arc<ChatService>,
}

impl AppServices {
    pub fn build(config: &Config, pool: DynDatabasePool) -> anyhow::Result<Self> {
        let ttl = chrono::Duration::hours(config.auth.token_ttl_hours);
        let signer = match config.auth.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => TokenSigner::new(secret, ttl),
            None => {
                tracing::warn!(
                    "JWT_SECRET is not set, using a random secret; tokens will not survive a restart"
                );
                TokenSigner::ephemeral(ttl)
            }
        };

        let mailer = Arc::new(NotificationMailer::from_config(&config.mail));
        let client = ChatCompletionClient::new()?;

        Ok(Self {
            auth_service: Arc::new(AuthService::new(
                SqlxUserRepository::boxed(pool.clone()),
                signer,
            )),
            blog_service: Arc::new(BlogService::new(SqlxBlogRepository::boxed(pool.clone()))),
            project_service: Arc::new(ProjectService::new(SqlxProjectRepository::boxed(
                pool.clone(),
            ))),
            testimonial_service: Arc::new(TestimonialService::new(
                SqlxTestimonialRepository::boxed(pool.clone()),
            )),
            resume_service: Arc::new(ResumeService::new(SqlxResumeRepository::boxed(
                pool.clone(),
            ))),
            message_service: Arc::new(MessageService::new(
                SqlxMessageRepository::boxed(pool.clone()),
                mailer,
            )),
            faq_service: Arc::new(FaqService::new(SqlxFaqRepository::boxed(pool.clone()))),
            chat_service: Arc::new(ChatService::new(
                client,
                config.assistant.clone(),
                config.chatbot.clone(),
                SnapshotSources::from_pool(pool),
            )),
        })
    }
}
