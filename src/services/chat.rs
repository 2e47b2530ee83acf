//! Chat service
//!
//! Two chat surfaces share one completion client and one prompt module:
//! the portfolio assistant (`/api/chat`, OpenAI) and the gateway chatbot
//! (`/api/chatbot/chat`, OpenRouter). Neither hard-fails for a missing or
//! rejected key; each has its own canned fallback.

use crate::config::{AssistantConfig, ChatbotConfig};
use crate::db::repositories::{
    BlogRepository, FaqRepository, ProjectRepository, ResumeRepository, SqlxBlogRepository,
    SqlxFaqRepository, SqlxProjectRepository, SqlxResumeRepository, SqlxTestimonialRepository,
    TestimonialRepository,
};
use crate::db::DynDatabasePool;
use crate::services::llm::{ChatCompletionClient, ChatMessage, CompletionRequest, Endpoint, LlmError};
use crate::services::prompt::{self, Persona, PortfolioSnapshot};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Message is required")]
    EmptyMessage,

    #[error("AI service not configured")]
    NotConfigured,

    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Reply of the gateway chatbot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayReply {
    pub reply: String,
    /// Absent on the offline fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Repositories the assistant reads its context from
#[derive(Clone)]
pub struct SnapshotSources {
    pub projects: Arc<dyn ProjectRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub testimonials: Arc<dyn TestimonialRepository>,
    pub resumes: Arc<dyn ResumeRepository>,
    pub faqs: Arc<dyn FaqRepository>,
}

impl SnapshotSources {
    pub fn from_pool(pool: DynDatabasePool) -> Self {
        Self {
            projects: SqlxProjectRepository::boxed(pool.clone()),
            blogs: SqlxBlogRepository::boxed(pool.clone()),
            testimonials: SqlxTestimonialRepository::boxed(pool.clone()),
            resumes: SqlxResumeRepository::boxed(pool.clone()),
            faqs: SqlxFaqRepository::boxed(pool),
        }
    }

    /// Published blogs and featured testimonials only; drafts stay private
    pub async fn load(&self) -> anyhow::Result<PortfolioSnapshot> {
        let (projects, blogs, testimonials, resume, faqs) = tokio::try_join!(
            self.projects.list(),
            self.blogs.list_published(),
            self.testimonials.list_featured(),
            self.resumes.latest(),
            self.faqs.list(),
        )?;
        Ok(PortfolioSnapshot {
            projects,
            blogs,
            testimonials,
            resume,
            faqs,
        })
    }
}

pub struct ChatService {
    client: ChatCompletionClient,
    assistant: AssistantConfig,
    chatbot: ChatbotConfig,
    persona: Persona,
    sources: SnapshotSources,
}

impl ChatService {
    pub fn new(
        client: ChatCompletionClient,
        assistant: AssistantConfig,
        chatbot: ChatbotConfig,
        sources: SnapshotSources,
    ) -> Self {
        let persona = Persona::from_config(&assistant);
        Self {
            client,
            assistant,
            chatbot,
            persona,
            sources,
        }
    }

    /// Answer a visitor question about the portfolio
    pub async fn assistant_reply(&self, message: &str) -> Result<String, ChatError> {
        let snapshot = self.sources.load().await?;

        let Some(api_key) = self.assistant.usable_key() else {
            tracing::debug!("No OpenAI key configured, answering with the canned reply");
            return Ok(prompt::canned_assistant_reply(&snapshot, &self.persona));
        };

        let endpoint = Endpoint {
            url: format!("{}/chat/completions", self.assistant.base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            headers: Vec::new(),
        };
        let request = CompletionRequest {
            model: self.assistant.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::assistant_context(&snapshot, &self.persona)),
                ChatMessage::user(message),
            ],
            temperature: None,
            max_tokens: self.assistant.max_tokens,
        };

        match self.client.complete(&endpoint, &request).await {
            Ok(reply) => Ok(reply),
            Err(LlmError::Unauthorized(status)) => {
                tracing::warn!("OpenAI rejected the API key ({}), answering with the canned reply", status);
                Ok(prompt::canned_assistant_reply(&snapshot, &self.persona))
            }
            Err(e) => {
                tracing::error!("Chat error: {}", e);
                Err(e.into())
            }
        }
    }

    /// Answer through the gateway with the visitor's recent history
    pub async fn gateway_reply(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<GatewayReply, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let api_key = self
            .chatbot
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ChatError::NotConfigured)?;

        let endpoint = Endpoint {
            url: self.chatbot.gateway_url.clone(),
            api_key: api_key.to_string(),
            headers: vec![
                ("HTTP-Referer".to_string(), self.chatbot.frontend_url.clone()),
                ("X-Title".to_string(), self.chatbot.app_title.clone()),
            ],
        };
        let request = CompletionRequest {
            model: self.chatbot.model.clone(),
            messages: prompt::conversation(
                prompt::knowledge_base(&self.persona),
                history,
                message,
                self.chatbot.history_window,
            ),
            temperature: Some(self.chatbot.temperature),
            max_tokens: self.chatbot.max_tokens,
        };

        let reply = match self.client.complete(&endpoint, &request).await {
            Ok(reply) => reply,
            Err(LlmError::EmptyResponse) => prompt::EMPTY_COMPLETION_REPLY.to_string(),
            Err(e) => {
                tracing::error!("Gateway chatbot error: {}", e);
                return Ok(GatewayReply {
                    reply: prompt::offline_reply(&self.persona),
                    model: None,
                    timestamp: timestamp(),
                });
            }
        };

        Ok(GatewayReply {
            reply,
            model: Some(self.chatbot.reported_model.clone()),
            timestamp: timestamp(),
        })
    }

    pub fn suggested_questions(&self) -> Vec<&'static str> {
        prompt::SUGGESTED_QUESTIONS.to_vec()
    }

    pub fn faq(&self) -> Vec<FaqEntry> {
        prompt::OFFLINE_FAQ
            .iter()
            .map(|&(question, answer)| FaqEntry { question, answer })
            .collect()
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn service(assistant: AssistantConfig, chatbot: ChatbotConfig) -> ChatService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        ChatService::new(
            ChatCompletionClient::new().unwrap(),
            assistant,
            chatbot,
            SnapshotSources::from_pool(pool),
        )
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
    async fn test_assistant_without_key_is_canned() {
        let service = service(AssistantConfig::default(), ChatbotConfig::default()).await;

        let a = service.assistant_reply("hello").await.unwrap();
        let b = service.assistant_reply("something else").await.unwrap();
        assert_eq!(a, b);
        assert!(a.contains("0 project(s)"));
    }

    #[tokio::test]
    async fn test_assistant_uses_provider_reply() {
        let base = spawn(provider(StatusCode::OK, "Hello from the model")).await;
        let assistant = AssistantConfig {
            api_key: Some("sk-test".to_string()),
            base_url: base,
            ..AssistantConfig::default()
        };
        let service = service(assistant, ChatbotConfig::default()).await;

        assert_eq!(service.assistant_reply("hi").await.unwrap(), "Hello from the model");
    }

    #[tokio::test]
    async fn test_assistant_rejected_key_is_canned() {
        let base = spawn(provider(StatusCode::UNAUTHORIZED, "")).await;
        let assistant = AssistantConfig {
            api_key: Some("sk-revoked".to_string()),
            base_url: base,
            ..AssistantConfig::default()
        };
        let service = service(assistant, ChatbotConfig::default()).await;

        let reply = service.assistant_reply("hi").await.unwrap();
        assert!(reply.starts_with("Hi! I'm the portfolio assistant"));
    }

    #[tokio::test]
    async fn test_assistant_provider_failure_is_an_error() {
        let base = spawn(provider(StatusCode::INTERNAL_SERVER_ERROR, "")).await;
        let assistant = AssistantConfig {
            api_key: Some("sk-test".to_string()),
            base_url: base,
            ..AssistantConfig::default()
        };
        let service = service(assistant, ChatbotConfig::default()).await;

        assert!(matches!(service.assistant_reply("hi").await, Err(ChatError::Provider(_))));
    }

    #[tokio::test]
    async fn test_gateway_validation_and_configuration() {
        let service = service(AssistantConfig::default(), ChatbotConfig::default()).await;

        assert!(matches!(service.gateway_reply("   ", &[]).await, Err(ChatError::EmptyMessage)));
        assert!(matches!(service.gateway_reply("hi", &[]).await, Err(ChatError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_gateway_success_reports_model() {
        let base = spawn(provider(StatusCode::OK, "Gateway says hi")).await;
        let chatbot = ChatbotConfig {
            api_key: Some("or-key".to_string()),
            gateway_url: format!("{}/chat/completions", base),
            ..ChatbotConfig::default()
        };
        let service = service(AssistantConfig::default(), chatbot).await;

        let reply = service
            .gateway_reply("hi", &[ChatMessage::user("earlier"), ChatMessage::assistant("answer")])
            .await
            .unwrap();
        assert_eq!(reply.reply, "Gateway says hi");
        assert_eq!(reply.model.as_deref(), Some("gemini-2.0-flash-exp"));
    }

    #[tokio::test]
    async fn test_gateway_empty_completion_uses_apology() {
        let base = spawn(provider(StatusCode::OK, "")).await;
        let chatbot = ChatbotConfig {
            api_key: Some("or-key".to_string()),
            gateway_url: format!("{}/chat/completions", base),
            ..ChatbotConfig::default()
        };
        let service = service(AssistantConfig::default(), chatbot).await;

        let reply = service.gateway_reply("hi", &[]).await.unwrap();
        assert_eq!(reply.reply, prompt::EMPTY_COMPLETION_REPLY);
    }

    #[tokio::test]
    async fn test_gateway_failure_goes_offline() {
        let base = spawn(provider(StatusCode::UNAUTHORIZED, "")).await;
        let chatbot = ChatbotConfig {
            api_key: Some("bad-key".to_string()),
            gateway_url: format!("{}/chat/completions", base),
            ..ChatbotConfig::default()
        };
        let service = service(AssistantConfig::default(), chatbot).await;

        let reply = service.gateway_reply("hi", &[]).await.unwrap();
        assert!(reply.reply.starts_with("(Offline Mode)"));
        assert!(reply.model.is_none());
    }

    #[tokio::test]
    async fn test_static_lists() {
        let service = service(AssistantConfig::default(), ChatbotConfig::default()).await;
        assert_eq!(service.suggested_questions().len(), 10);
        assert_eq!(service.faq().len(), 4);
        assert_eq!(service.faq()[0].question, "What technologies do you work with?");
    }
}
