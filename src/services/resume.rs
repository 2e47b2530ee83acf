//! Resume service

use crate::db::repositories::ResumeRepository;
use crate::models::{CreateResumeInput, Resume};
use crate::services::content::{all_present, ContentError};
use std::sync::Arc;

pub struct ResumeService {
    repo: Arc<dyn ResumeRepository>,
}

impl ResumeService {
    pub fn new(repo: Arc<dyn ResumeRepository>) -> Self {
        Self { repo }
    }

    /// The most recently uploaded resume, if any
    pub async fn latest(&self) -> Result<Option<Resume>, ContentError> {
        Ok(self.repo.latest().await?)
    }

    /// Record metadata for a resume file hosted elsewhere
    pub async fn create(&self, input: CreateResumeInput) -> Result<Resume, ContentError> {
        if !all_present(&[input.file_url.as_str()]) {
            return Err(ContentError::Validation("File URL is required".to_string()));
        }
        let resume = self.repo.create(&Resume::new(input)).await?;
        tracing::info!("Saved resume metadata for {}", resume.file_url);
        Ok(resume)
    }
}
