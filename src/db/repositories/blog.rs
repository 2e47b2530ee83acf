//! Blog repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::Blog;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const SELECT_BLOG: &str = "SELECT id, title, slug, content, excerpt, cover_image, published, created_at, updated_at FROM blogs";

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, blog: &Blog) -> Result<Blog>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Blog>>;
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Blog>>;
    /// Published posts, newest first
    async fn list_published(&self) -> Result<Vec<Blog>>;
    /// Every post regardless of state, newest first
    async fn list_all(&self) -> Result<Vec<Blog>>;
    async fn update(&self, blog: &Blog) -> Result<Blog>;
    /// Returns false when no row matched
    async fn delete(&self, id: &str) -> Result<bool>;
    async fn exists_by_slug(&self, slug: &str) -> Result<bool>;
    async fn count(&self) -> Result<i64>;
}

pub struct SqlxBlogRepository {
    pool: DynDatabasePool,
}

impl SqlxBlogRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn BlogRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl BlogRepository for SqlxBlogRepository {
    async fn create(&self, blog: &Blog) -> Result<Blog> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => create_sqlite(pool, blog).await,
            Backend::Mysql(pool) => create_mysql(pool, blog).await,
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Blog>> {
        let sql = format!("{} WHERE id = ?", SELECT_BLOG);
        match self.pool.backend() {
            Backend::Sqlite(pool) => get_one_sqlite(pool, &sql, id).await,
            Backend::Mysql(pool) => get_one_mysql(pool, &sql, id).await,
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Blog>> {
        let sql = format!("{} WHERE slug = ?", SELECT_BLOG);
        match self.pool.backend() {
            Backend::Sqlite(pool) => get_one_sqlite(pool, &sql, slug).await,
            Backend::Mysql(pool) => get_one_mysql(pool, &sql, slug).await,
        }
    }

    async fn list_published(&self) -> Result<Vec<Blog>> {
        let sql = format!("{} WHERE published = ? ORDER BY created_at DESC", SELECT_BLOG);
        match self.pool.backend() {
            Backend::Sqlite(pool) => list_sqlite(pool, &sql, Some(true)).await,
            Backend::Mysql(pool) => list_mysql(pool, &sql, Some(true)).await,
        }
    }

    async fn list_all(&self) -> Result<Vec<Blog>> {
        let sql = format!("{} ORDER BY created_at DESC", SELECT_BLOG);
        match self.pool.backend() {
            Backend::Sqlite(pool) => list_sqlite(pool, &sql, None).await,
            Backend::Mysql(pool) => list_mysql(pool, &sql, None).await,
        }
    }

    async fn update(&self, blog: &Blog) -> Result<Blog> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => update_sqlite(pool, blog).await,
            Backend::Mysql(pool) => update_mysql(pool, blog).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let affected = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query("DELETE FROM blogs WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete blog")?
                .rows_affected(),
            Backend::Mysql(pool) => sqlx::query("DELETE FROM blogs WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete blog")?
                .rows_affected(),
        };
        Ok(affected > 0)
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool> {
        let count: i64 = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query("SELECT COUNT(*) as count FROM blogs WHERE slug = ?")
                .bind(slug)
                .fetch_one(pool)
                .await
                .context("Failed to check blog slug")?
                .get("count"),
            Backend::Mysql(pool) => sqlx::query("SELECT COUNT(*) as count FROM blogs WHERE slug = ?")
                .bind(slug)
                .fetch_one(pool)
                .await
                .context("Failed to check blog slug")?
                .get("count"),
        };
        Ok(count > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query("SELECT COUNT(*) as count FROM blogs")
                .fetch_one(pool)
                .await
                .context("Failed to count blogs")?
                .get("count"),
            Backend::Mysql(pool) => sqlx::query("SELECT COUNT(*) as count FROM blogs")
                .fetch_one(pool)
                .await
                .context("Failed to count blogs")?
                .get("count"),
        };
        Ok(count)
    }
}

// SQLite implementations
async fn create_sqlite(pool: &SqlitePool, blog: &Blog) -> Result<Blog> {
    sqlx::query(
        "INSERT INTO blogs (id, title, slug, content, excerpt, cover_image, published, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&blog.id)
    .bind(&blog.title)
    .bind(&blog.slug)
    .bind(&blog.content)
    .bind(&blog.excerpt)
    .bind(&blog.cover_image)
    .bind(blog.published)
    .bind(blog.created_at)
    .bind(blog.updated_at)
    .execute(pool)
    .await
    .context("Failed to create blog")?;

    Ok(blog.clone())
}

async fn get_one_sqlite(pool: &SqlitePool, sql: &str, key: &str) -> Result<Option<Blog>> {
    let row = sqlx::query(sql)
        .bind(key)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog")?;
    Ok(row.map(|r| row_to_blog_sqlite(&r)))
}

async fn list_sqlite(pool: &SqlitePool, sql: &str, published: Option<bool>) -> Result<Vec<Blog>> {
    let mut query = sqlx::query(sql);
    if let Some(published) = published {
        query = query.bind(published);
    }
    let rows = query.fetch_all(pool).await.context("Failed to list blogs")?;
    Ok(rows.iter().map(row_to_blog_sqlite).collect())
}

async fn update_sqlite(pool: &SqlitePool, blog: &Blog) -> Result<Blog> {
    sqlx::query(
        "UPDATE blogs SET title = ?, slug = ?, content = ?, excerpt = ?, cover_image = ?, published = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&blog.title)
    .bind(&blog.slug)
    .bind(&blog.content)
    .bind(&blog.excerpt)
    .bind(&blog.cover_image)
    .bind(blog.published)
    .bind(blog.updated_at)
    .bind(&blog.id)
    .execute(pool)
    .await
    .context("Failed to update blog")?;

    Ok(blog.clone())
}

fn row_to_blog_sqlite(row: &sqlx::sqlite::SqliteRow) -> Blog {
    Blog {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        content: row.get("content"),
        excerpt: row.get("excerpt"),
        cover_image: row.get("cover_image"),
        published: row.get("published"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

// MySQL implementations
async fn create_mysql(pool: &MySqlPool, blog: &Blog) -> Result<Blog> {
    sqlx::query(
        "INSERT INTO blogs (id, title, slug, content, excerpt, cover_image, published, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&blog.id)
    .bind(&blog.title)
    .bind(&blog.slug)
    .bind(&blog.content)
    .bind(&blog.excerpt)
    .bind(&blog.cover_image)
    .bind(blog.published)
    .bind(blog.created_at)
    .bind(blog.updated_at)
    .execute(pool)
    .await
    .context("Failed to create blog")?;

    Ok(blog.clone())
}

async fn get_one_mysql(pool: &MySqlPool, sql: &str, key: &str) -> Result<Option<Blog>> {
    let row = sqlx::query(sql)
        .bind(key)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog")?;
    Ok(row.map(|r| row_to_blog_mysql(&r)))
}

async fn list_mysql(pool: &MySqlPool, sql: &str, published: Option<bool>) -> Result<Vec<Blog>> {
    let mut query = sqlx::query(sql);
    if let Some(published) = published {
        query = query.bind(published);
    }
    let rows = query.fetch_all(pool).await.context("Failed to list blogs")?;
    Ok(rows.iter().map(row_to_blog_mysql).collect())
}

async fn update_mysql(pool: &MySqlPool, blog: &Blog) -> Result<Blog> {
    sqlx::query(
        "UPDATE blogs SET title = ?, slug = ?, content = ?, excerpt = ?, cover_image = ?, published = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&blog.title)
    .bind(&blog.slug)
    .bind(&blog.content)
    .bind(&blog.excerpt)
    .bind(&blog.cover_image)
    .bind(blog.published)
    .bind(blog.updated_at)
    .bind(&blog.id)
    .execute(pool)
    .await
    .context("Failed to update blog")?;

    Ok(blog.clone())
}

fn row_to_blog_mysql(row: &sqlx::mysql::MySqlRow) -> Blog {
    Blog {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        content: row.get("content"),
        excerpt: row.get("excerpt"),
        cover_image: row.get("cover_image"),
        published: row.get("published"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
