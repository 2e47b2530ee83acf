//! FAQ repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::Faq;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row;
use std::sync::Arc;

const INSERT_FAQ: &str = "INSERT INTO faqs (id, question, answer, created_at) VALUES (?, ?, ?, ?)";
const SELECT_FAQS: &str = "SELECT id, question, answer, created_at FROM faqs ORDER BY created_at ASC";

#[async_trait]
pub trait FaqRepository: Send + Sync {
    async fn create(&self, faq: &Faq) -> Result<Faq>;
    /// Insert several entries in one transaction
    async fn create_many(&self, faqs: &[Faq]) -> Result<usize>;
    /// Oldest first, in the order they were added
    async fn list(&self) -> Result<Vec<Faq>>;
    async fn delete(&self, id: &str) -> Result<bool>;
    async fn count(&self) -> Result<i64>;
}

pub struct SqlxFaqRepository {
    pool: DynDatabasePool,
}

impl SqlxFaqRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn FaqRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl FaqRepository for SqlxFaqRepository {
    async fn create(&self, faq: &Faq) -> Result<Faq> {
        self.create_many(std::slice::from_ref(faq)).await?;
        Ok(faq.clone())
    }

    async fn create_many(&self, faqs: &[Faq]) -> Result<usize> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                let mut tx = pool.begin().await.context("Failed to begin transaction")?;
                for faq in faqs {
                    sqlx::query(INSERT_FAQ)
                        .bind(&faq.id)
                        .bind(&faq.question)
                        .bind(&faq.answer)
                        .bind(faq.created_at)
                        .execute(&mut *tx)
                        .await
                        .context("Failed to create FAQ")?;
                }
                tx.commit().await.context("Failed to commit FAQs")?;
            }
            Backend::Mysql(pool) => {
                let mut tx = pool.begin().await.context("Failed to begin transaction")?;
                for faq in faqs {
                    sqlx::query(INSERT_FAQ)
                        .bind(&faq.id)
                        .bind(&faq.question)
                        .bind(&faq.answer)
                        .bind(faq.created_at)
                        .execute(&mut *tx)
                        .await
                        .context("Failed to create FAQ")?;
                }
                tx.commit().await.context("Failed to commit FAQs")?;
            }
        }
        Ok(faqs.len())
    }

    async fn list(&self) -> Result<Vec<Faq>> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                let rows = sqlx::query(SELECT_FAQS)
                    .fetch_all(pool)
                    .await
                    .context("Failed to list FAQs")?;
                Ok(rows
                    .iter()
                    .map(|r| Faq {
                        id: r.get("id"),
                        question: r.get("question"),
                        answer: r.get("answer"),
                        created_at: r.get("created_at"),
                    })
                    .collect())
            }
            Backend::Mysql(pool) => {
                let rows = sqlx::query(SELECT_FAQS)
                    .fetch_all(pool)
                    .await
                    .context("Failed to list FAQs")?;
                Ok(rows
                    .iter()
                    .map(|r| Faq {
                        id: r.get("id"),
                        question: r.get("question"),
                        answer: r.get("answer"),
                        created_at: r.get("created_at"),
                    })
                    .collect())
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let affected = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query("DELETE FROM faqs WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete FAQ")?
                .rows_affected(),
            Backend::Mysql(pool) => sqlx::query("DELETE FROM faqs WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete FAQ")?
                .rows_affected(),
        };
        Ok(affected > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query("SELECT COUNT(*) as count FROM faqs")
                .fetch_one(pool)
                .await
                .context("Failed to count FAQs")?
                .get("count"),
            Backend::Mysql(pool) => sqlx::query("SELECT COUNT(*) as count FROM faqs")
                .fetch_one(pool)
                .await
                .context("Failed to count FAQs")?
                .get("count"),
        };
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxFaqRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxFaqRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_many_and_count() {
        let repo = setup_test_repo().await;
        let faqs = vec![Faq::new("Q1?", "A1"), Faq::new("Q2?", "A2")];

        assert_eq!(repo.create_many(&faqs).await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 2);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|f| f.question == "Q2?" && f.answer == "A2"));
    }

    #[tokio::test]
    async fn test_create_and_delete_faq() {
        let repo = setup_test_repo().await;
        let faq = repo.create(&Faq::new("Why?", "Because")).await.unwrap();

        assert!(repo.delete(&faq.id).await.unwrap());
        assert!(!repo.delete(&faq.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
