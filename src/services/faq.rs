//! FAQ service

use crate::db::repositories::FaqRepository;
use crate::models::{CreateFaqInput, Faq};
use crate::services::content::{all_present, ContentError};
use std::sync::Arc;

/// Entries inserted into an empty FAQ table at startup
pub const DEFAULT_FAQS: [(&str, &str); 6] = [
    (
        "What are your primary technologies?",
        "I am a Full-Stack developer specializing in React, Next.js, TypeScript, Node.js, and Prisma. I also created RoksJS.",
    ),
    (
        "Are you available for freelance projects?",
        "Yes, I am always open to discussing innovative projects and visionary collaborations.",
    ),
    (
        "How can I hire you?",
        "You can use the contact form on this website or reach out via the provided email in the resume to discuss your project.",
    ),
    (
        "What is RoksJS?",
        "RoksJS is my flagship JavaScript framework/utility designed for high-performance and developer-friendly application architecture.",
    ),
    (
        "Do you provide maintenance for your projects?",
        "Yes, I offer professional maintenance and support for all my custom-built solutions to ensure long-term stability and security.",
    ),
    (
        "What is your typical development workflow?",
        "I follow a rigorous, design-first approach, prioritizing clean code, robust security, and exceptional UI/UX for all applications.",
    ),
];

pub struct FaqService {
    repo: Arc<dyn FaqRepository>,
}

impl FaqService {
    pub fn new(repo: Arc<dyn FaqRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Faq>, ContentError> {
        Ok(self.repo.list().await?)
    }

    pub async fn create(&self, input: CreateFaqInput) -> Result<Faq, ContentError> {
        if !all_present(&[input.question.as_str(), input.answer.as_str()]) {
            return Err(ContentError::Validation(
                "Question and answer are required".to_string(),
            ));
        }
        Ok(self.repo.create(&Faq::new(input.question, input.answer)).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        if !self.repo.delete(id).await? {
            return Err(ContentError::NotFound("FAQ"));
        }
        Ok(())
    }

    /// Insert `DEFAULT_FAQS` when the table is empty; returns how many were added
    pub async fn seed_defaults(&self) -> Result<usize, ContentError> {
        if self.repo.count().await? > 0 {
            return Ok(0);
        }

        let faqs: Vec<Faq> = DEFAULT_FAQS
            .iter()
            .map(|&(question, answer)| Faq::new(question, answer))
            .collect();
        let inserted = self.repo.create_many(&faqs).await?;
        tracing::info!("Seeded {} FAQs", inserted);
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxFaqRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup_service() -> FaqService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        FaqService::new(SqlxFaqRepository::boxed(pool))
    }

    #[tokio::test]
    async fn test_seed_defaults_only_fills_empty_table() {
        let service = setup_service().await;

        assert_eq!(service.seed_defaults().await.unwrap(), 6);
        assert_eq!(service.seed_defaults().await.unwrap(), 0);
        assert_eq!(service.list().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_existing_faq_prevents_seeding() {
        let service = setup_service().await;
        service
            .create(CreateFaqInput {
                question: "Custom?".to_string(),
                answer: "Yes".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(service.seed_defaults().await.unwrap(), 0);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_validation_and_delete() {
        let service = setup_service().await;
        let result = service
            .create(CreateFaqInput {
                question: "".to_string(),
                answer: "x".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ContentError::Validation(_))));
        assert!(matches!(service.delete("nope").await, Err(ContentError::NotFound("FAQ"))));
    }
}
