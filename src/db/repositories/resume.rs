//! Resume repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::Resume;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row;
use std::sync::Arc;

const INSERT_RESUME: &str =
    "INSERT INTO resumes (id, file_url, file_name, role, skills, uploaded_at) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_LATEST: &str = "SELECT id, file_url, file_name, role, skills, uploaded_at FROM resumes ORDER BY uploaded_at DESC LIMIT 1";

/// Resume records are append-only; the newest upload is the current one.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn create(&self, resume: &Resume) -> Result<Resume>;
    async fn latest(&self) -> Result<Option<Resume>>;
}

pub struct SqlxResumeRepository {
    pool: DynDatabasePool,
}

impl SqlxResumeRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ResumeRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ResumeRepository for SqlxResumeRepository {
    async fn create(&self, resume: &Resume) -> Result<Resume> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                sqlx::query(INSERT_RESUME)
                    .bind(&resume.id)
                    .bind(&resume.file_url)
                    .bind(&resume.file_name)
                    .bind(&resume.role)
                    .bind(&resume.skills)
                    .bind(resume.uploaded_at)
                    .execute(pool)
                    .await
                    .context("Failed to create resume")?;
            }
            Backend::Mysql(pool) => {
                sqlx::query(INSERT_RESUME)
                    .bind(&resume.id)
                    .bind(&resume.file_url)
                    .bind(&resume.file_name)
                    .bind(&resume.role)
                    .bind(&resume.skills)
                    .bind(resume.uploaded_at)
                    .execute(pool)
                    .await
                    .context("Failed to create resume")?;
            }
        }
        Ok(resume.clone())
    }

    async fn latest(&self) -> Result<Option<Resume>> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                let row = sqlx::query(SELECT_LATEST)
                    .fetch_optional(pool)
                    .await
                    .context("Failed to get resume")?;
                Ok(row.map(|r| Resume {
                    id: r.get("id"),
                    file_url: r.get("file_url"),
                    file_name: r.get("file_name"),
                    role: r.get("role"),
                    skills: r.get("skills"),
                    uploaded_at: r.get("uploaded_at"),
                }))
            }
            Backend::Mysql(pool) => {
                let row = sqlx::query(SELECT_LATEST)
                    .fetch_optional(pool)
                    .await
                    .context("Failed to get resume")?;
                Ok(row.map(|r| Resume {
                    id: r.get("id"),
                    file_url: r.get("file_url"),
                    file_name: r.get("file_name"),
                    role: r.get("role"),
                    skills: r.get("skills"),
                    uploaded_at: r.get("uploaded_at"),
                }))
            }
        }
    }
}
