//! Blog service

use crate::db::repositories::BlogRepository;
use crate::models::{Blog, CreateBlogInput, UpdateBlogInput};
use crate::services::content::{all_present, none_blank, ContentError};
use chrono::Utc;
use std::sync::Arc;

const REQUIRED_FIELDS: &str = "Title, slug and content are required";

pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    /// Published posts, newest first
    pub async fn list_published(&self) -> Result<Vec<Blog>, ContentError> {
        Ok(self.repo.list_published().await?)
    }

    /// All posts including drafts
    pub async fn list_all(&self) -> Result<Vec<Blog>, ContentError> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Blog, ContentError> {
        self.repo
            .get_by_slug(slug)
            .await?
            .ok_or(ContentError::NotFound("Blog"))
    }

    pub async fn create(&self, input: CreateBlogInput) -> Result<Blog, ContentError> {
        if !all_present(&[input.title.as_str(), input.slug.as_str(), input.content.as_str()]) {
            return Err(ContentError::Validation(REQUIRED_FIELDS.to_string()));
        }
        if self.repo.exists_by_slug(&input.slug).await? {
            return Err(slug_taken(&input.slug));
        }

        let blog = self.repo.create(&Blog::new(input)).await?;
        tracing::info!("Created blog {} ({})", blog.slug, blog.id);
        Ok(blog)
    }

    /// Apply a partial update; a changed slug must still be unique
    pub async fn update(&self, id: &str, input: UpdateBlogInput) -> Result<Blog, ContentError> {
        if !none_blank(&[input.title.as_ref(), input.slug.as_ref(), input.content.as_ref()]) {
            return Err(ContentError::Validation(REQUIRED_FIELDS.to_string()));
        }

        let mut blog = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("Blog"))?;

        if let Some(slug) = input.slug {
            if slug != blog.slug && self.repo.exists_by_slug(&slug).await? {
                return Err(slug_taken(&slug));
            }
            blog.slug = slug;
        }
        if let Some(title) = input.title {
            blog.title = title;
        }
        if let Some(content) = input.content {
            blog.content = content;
        }
        if let Some(excerpt) = input.excerpt {
            blog.excerpt = excerpt;
        }
        if let Some(cover_image) = input.cover_image {
            blog.cover_image = cover_image;
        }
        if let Some(published) = input.published {
            blog.published = published;
        }
        blog.updated_at = Utc::now();

        Ok(self.repo.update(&blog).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        if !self.repo.delete(id).await? {
            return Err(ContentError::NotFound("Blog"));
        }
        tracing::info!("Deleted blog {}", id);
        Ok(())
    }
}

fn slug_taken(slug: &str) -> ContentError {
    ContentError::Conflict(format!("A blog with slug '{}' already exists", slug))
}
