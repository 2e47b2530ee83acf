//! Project repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::Project;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const SELECT_PROJECT: &str = "SELECT id, title, description, technologies, thumbnail, live_url, github_url, created_at, updated_at FROM projects";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: &Project) -> Result<Project>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Project>>;
    /// Newest first
    async fn list(&self) -> Result<Vec<Project>>;
    async fn update(&self, project: &Project) -> Result<Project>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct SqlxProjectRepository {
    pool: DynDatabasePool,
}

impl SqlxProjectRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ProjectRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepository {
    async fn create(&self, project: &Project) -> Result<Project> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => create_sqlite(pool, project).await,
            Backend::Mysql(pool) => create_mysql(pool, project).await,
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Project>> {
        let sql = format!("{} WHERE id = ?", SELECT_PROJECT);
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                let row = sqlx::query(&sql)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .context("Failed to get project")?;
                Ok(row.map(|r| row_to_project_sqlite(&r)))
            }
            Backend::Mysql(pool) => {
                let row = sqlx::query(&sql)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .context("Failed to get project")?;
                Ok(row.map(|r| row_to_project_mysql(&r)))
            }
        }
    }

    async fn list(&self) -> Result<Vec<Project>> {
        let sql = format!("{} ORDER BY created_at DESC", SELECT_PROJECT);
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                let rows = sqlx::query(&sql)
                    .fetch_all(pool)
                    .await
                    .context("Failed to list projects")?;
                Ok(rows.iter().map(row_to_project_sqlite).collect())
            }
            Backend::Mysql(pool) => {
                let rows = sqlx::query(&sql)
                    .fetch_all(pool)
                    .await
                    .context("Failed to list projects")?;
                Ok(rows.iter().map(row_to_project_mysql).collect())
            }
        }
    }

    async fn update(&self, project: &Project) -> Result<Project> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => update_sqlite(pool, project).await,
            Backend::Mysql(pool) => update_mysql(pool, project).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let affected = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query("DELETE FROM projects WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete project")?
                .rows_affected(),
            Backend::Mysql(pool) => sqlx::query("DELETE FROM projects WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete project")?
                .rows_affected(),
        };
        Ok(affected > 0)
    }
}

// SQLite implementations
async fn create_sqlite(pool: &SqlitePool, project: &Project) -> Result<Project> {
    sqlx::query(
        "INSERT INTO projects (id, title, description, technologies, thumbnail, live_url, github_url, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&project.id)
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.technologies)
    .bind(&project.thumbnail)
    .bind(&project.live_url)
    .bind(&project.github_url)
    .bind(project.created_at)
    .bind(project.updated_at)
    .execute(pool)
    .await
    .context("Failed to create project")?;

    Ok(project.clone())
}

async fn update_sqlite(pool: &SqlitePool, project: &Project) -> Result<Project> {
    sqlx::query(
        "UPDATE projects SET title = ?, description = ?, technologies = ?, thumbnail = ?, live_url = ?, github_url = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.technologies)
    .bind(&project.thumbnail)
    .bind(&project.live_url)
    .bind(&project.github_url)
    .bind(project.updated_at)
    .bind(&project.id)
    .execute(pool)
    .await
    .context("Failed to update project")?;

    Ok(project.clone())
}

fn row_to_project_sqlite(row: &sqlx::sqlite::SqliteRow) -> Project {
    Project {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        technologies: row.get("technologies"),
        thumbnail: row.get("thumbnail"),
        live_url: row.get("live_url"),
        github_url: row.get("github_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

// MySQL implementations
async fn create_mysql(pool: &MySqlPool, project: &Project) -> Result<Project> {
    sqlx::query(
        "INSERT INTO projects (id, title, description, technologies, thumbnail, live_url, github_url, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&project.id)
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.technologies)
    .bind(&project.thumbnail)
    .bind(&project.live_url)
    .bind(&project.github_url)
    .bind(project.created_at)
    .bind(project.updated_at)
    .execute(pool)
    .await
    .context("Failed to create project")?;

    Ok(project.clone())
}

async fn update_mysql(pool: &MySqlPool, project: &Project) -> Result<Project> {
    sqlx::query(
        "UPDATE projects SET title = ?, description = ?, technologies = ?, thumbnail = ?, live_url = ?, github_url = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.technologies)
    .bind(&project.thumbnail)
    .bind(&project.live_url)
    .bind(&project.github_url)
    .bind(project.updated_at)
    .bind(&project.id)
    .execute(pool)
    .await
    .context("Failed to update project")?;

    Ok(project.clone())
}

fn row_to_project_mysql(row: &sqlx::mysql::MySqlRow) -> Project {
    Project {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        technologies: row.get("technologies"),
        thumbnail: row.get("thumbnail"),
        live_url: row.get("live_url"),
        github_url: row.get("github_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
