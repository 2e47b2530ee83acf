//! Project service

use crate::db::repositories::ProjectRepository;
use crate::models::{CreateProjectInput, Project, UpdateProjectInput};
use crate::services::content::{all_present, none_blank, ContentError};
use chrono::Utc;
use std::sync::Arc;

const REQUIRED_FIELDS: &str = "Title and description are required";

pub struct ProjectService {
    repo: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ContentError> {
        Ok(self.repo.list().await?)
    }

    pub async fn create(&self, input: CreateProjectInput) -> Result<Project, ContentError> {
        if !all_present(&[input.title.as_str(), input.description.as_str()]) {
            return Err(ContentError::Validation(REQUIRED_FIELDS.to_string()));
        }
        Ok(self.repo.create(&Project::new(input)).await?)
    }

    pub async fn update(&self, id: &str, input: UpdateProjectInput) -> Result<Project, ContentError> {
        if !none_blank(&[input.title.as_ref(), input.description.as_ref()]) {
            return Err(ContentError::Validation(REQUIRED_FIELDS.to_string()));
        }

        let mut project = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("Project"))?;

        if let Some(title) = input.title {
            project.title = title;
        }
        if let Some(description) = input.description {
            project.description = description;
        }
        if let Some(technologies) = input.technologies {
            project.technologies = technologies;
        }
        if let Some(thumbnail) = input.thumbnail {
            project.thumbnail = thumbnail;
        }
        if let Some(live_url) = input.live_url {
            project.live_url = live_url;
        }
        if let Some(github_url) = input.github_url {
            project.github_url = github_url;
        }
        project.updated_at = Utc::now();

        Ok(self.repo.update(&project).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        if !self.repo.delete(id).await? {
            return Err(ContentError::NotFound("Project"));
        }
        Ok(())
    }
}
