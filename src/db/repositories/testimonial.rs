//! Testimonial repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::Testimonial;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const SELECT_TESTIMONIAL: &str = "SELECT id, name, role, company, content, avatar, rating, is_featured, created_at FROM testimonials";

#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn create(&self, testimonial: &Testimonial) -> Result<Testimonial>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Testimonial>>;
    /// Featured testimonials, newest first
    async fn list_featured(&self) -> Result<Vec<Testimonial>>;
    async fn list_all(&self) -> Result<Vec<Testimonial>>;
    async fn update(&self, testimonial: &Testimonial) -> Result<Testimonial>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct SqlxTestimonialRepository {
    pool: DynDatabasePool,
}

impl SqlxTestimonialRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn TestimonialRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl TestimonialRepository for SqlxTestimonialRepository {
    async fn create(&self, testimonial: &Testimonial) -> Result<Testimonial> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => create_sqlite(pool, testimonial).await,
            Backend::Mysql(pool) => create_mysql(pool, testimonial).await,
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Testimonial>> {
        let sql = format!("{} WHERE id = ?", SELECT_TESTIMONIAL);
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                let row = sqlx::query(&sql)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .context("Failed to get testimonial")?;
                Ok(row.map(|r| row_to_testimonial_sqlite(&r)))
            }
            Backend::Mysql(pool) => {
                let row = sqlx::query(&sql)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .context("Failed to get testimonial")?;
                Ok(row.map(|r| row_to_testimonial_mysql(&r)))
            }
        }
    }

    async fn list_featured(&self) -> Result<Vec<Testimonial>> {
        let sql = format!("{} WHERE is_featured = ? ORDER BY created_at DESC", SELECT_TESTIMONIAL);
        match self.pool.backend() {
            Backend::Sqlite(pool) => list_sqlite(pool, &sql, Some(true)).await,
            Backend::Mysql(pool) => list_mysql(pool, &sql, Some(true)).await,
        }
    }

    async fn list_all(&self) -> Result<Vec<Testimonial>> {
        let sql = format!("{} ORDER BY created_at DESC", SELECT_TESTIMONIAL);
        match self.pool.backend() {
            Backend::Sqlite(pool) => list_sqlite(pool, &sql, None).await,
            Backend::Mysql(pool) => list_mysql(pool, &sql, None).await,
        }
    }

    async fn update(&self, testimonial: &Testimonial) -> Result<Testimonial> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => update_sqlite(pool, testimonial).await,
            Backend::Mysql(pool) => update_mysql(pool, testimonial).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let affected = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query("DELETE FROM testimonials WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete testimonial")?
                .rows_affected(),
            Backend::Mysql(pool) => sqlx::query("DELETE FROM testimonials WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete testimonial")?
                .rows_affected(),
        };
        Ok(affected > 0)
    }
}

// SQLite implementations
async fn create_sqlite(pool: &SqlitePool, t: &Testimonial) -> Result<Testimonial> {
    sqlx::query(
        "INSERT INTO testimonials (id, name, role, company, content, avatar, rating, is_featured, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&t.id)
    .bind(&t.name)
    .bind(&t.role)
    .bind(&t.company)
    .bind(&t.content)
    .bind(&t.avatar)
    .bind(t.rating)
    .bind(t.is_featured)
    .bind(t.created_at)
    .execute(pool)
    .await
    .context("Failed to create testimonial")?;

    Ok(t.clone())
}

async fn list_sqlite(pool: &SqlitePool, sql: &str, featured: Option<bool>) -> Result<Vec<Testimonial>> {
    let mut query = sqlx::query(sql);
    if let Some(featured) = featured {
        query = query.bind(featured);
    }
    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list testimonials")?;
    Ok(rows.iter().map(row_to_testimonial_sqlite).collect())
}

async fn update_sqlite(pool: &SqlitePool, t: &Testimonial) -> Result<Testimonial> {
    sqlx::query(
        "UPDATE testimonials SET name = ?, role = ?, company = ?, content = ?, avatar = ?, rating = ?, is_featured = ? WHERE id = ?",
    )
    .bind(&t.name)
    .bind(&t.role)
    .bind(&t.company)
    .bind(&t.content)
    .bind(&t.avatar)
    .bind(t.rating)
    .bind(t.is_featured)
    .bind(&t.id)
    .execute(pool)
    .await
    .context("Failed to update testimonial")?;

    Ok(t.clone())
}

fn row_to_testimonial_sqlite(row: &sqlx::sqlite::SqliteRow) -> Testimonial {
    Testimonial {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
        company: row.get("company"),
        content: row.get("content"),
        avatar: row.get("avatar"),
        rating: row.get("rating"),
        is_featured: row.get("is_featured"),
        created_at: row.get("created_at"),
    }
}

// MySQL implementations
async fn create_mysql(pool: &MySqlPool, t: &Testimonial) -> Result<Testimonial> {
    sqlx::query(
        "INSERT INTO testimonials (id, name, role, company, content, avatar, rating, is_featured, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&t.id)
    .bind(&t.name)
    .bind(&t.role)
    .bind(&t.company)
    .bind(&t.content)
    .bind(&t.avatar)
    .bind(t.rating)
    .bind(t.is_featured)
    .bind(t.created_at)
    .execute(pool)
    .await
    .context("Failed to create testimonial")?;

    Ok(t.clone())
}

async fn list_mysql(pool: &MySqlPool, sql: &str, featured: Option<bool>) -> Result<Vec<Testimonial>> {
    let mut query = sqlx::query(sql);
    if let Some(featured) = featured {
        query = query.bind(featured);
    }
    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list testimonials")?;
    Ok(rows.iter().map(row_to_testimonial_mysql).collect())
}

async fn update_mysql(pool: &MySqlPool, t: &Testimonial) -> Result<Testimonial> {
    sqlx::query(
        "UPDATE testimonials SET name = ?, role = ?, company = ?, content = ?, avatar = ?, rating = ?, is_featured = ? WHERE id = ?",
    )
    .bind(&t.name)
    .bind(&t.role)
    .bind(&t.company)
    .bind(&t.content)
    .bind(&t.avatar)
    .bind(t.rating)
    .bind(t.is_featured)
    .bind(&t.id)
    .execute(pool)
    .await
    .context("Failed to update testimonial")?;

    Ok(t.clone())
}

fn row_to_testimonial_mysql(row: &sqlx::mysql::MySqlRow) -> Testimonial {
    Testimonial {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
        company: row.get("company"),
        content: row.get("content"),
        avatar: row.get("avatar"),
        rating: row.get("rating"),
        is_featured: row.get("is_featured"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::CreateTestimonialInput;

    async fn setup_test_repo() -> SqlxTestimonialRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxTestimonialRepository::new(pool)
    }

    fn test_testimonial(name: &str, featured: bool) -> Testimonial {
        Testimonial::new(CreateTestimonialInput {
            name: name.to_string(),
            content: "Great work".to_string(),
            role: Some("CTO".to_string()),
            company: None,
            avatar: None,
            rating: Some(4),
            is_featured: Some(featured),
        })
    }

    #[tokio::test]
    async fn test_list_featured_filters() {
        let repo = setup_test_repo().await;
        repo.create(&test_testimonial("Ada", true)).await.unwrap();
        repo.create(&test_testimonial("Bob", false)).await.unwrap();

        let featured = repo.list_featured().await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].name, "Ada");
        assert_eq!(featured[0].rating, 4);
        assert_eq!(featured[0].role.as_deref(), Some("CTO"));

        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unfeaturing_hides_from_public_list() {
        let repo = setup_test_repo().await;
        let mut t = repo.create(&test_testimonial("Ada", true)).await.unwrap();

        t.is_featured = false;
        repo.update(&t).await.unwrap();

        assert!(repo.list_featured().await.unwrap().is_empty());
        let stored = repo.get_by_id(&t.id).await.unwrap().unwrap();
        assert!(!stored.is_featured);
    }

    #[tokio::test]
    async fn test_delete_testimonial() {
        let repo = setup_test_repo().await;
        let t = repo.create(&test_testimonial("Ada", true)).await.unwrap();
        assert!(repo.delete(&t.id).await.unwrap());
        assert!(!repo.delete(&t.id).await.unwrap());
    }
}
