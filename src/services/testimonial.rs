//! Testimonial service

use crate::db::repositories::TestimonialRepository;
use crate::models::{clamp_rating, CreateTestimonialInput, Testimonial, UpdateTestimonialInput};
use crate::services::content::{all_present, none_blank, ContentError};
use std::sync::Arc;

const REQUIRED_FIELDS: &str = "Name and content are required";

pub struct TestimonialService {
    repo: Arc<dyn TestimonialRepository>,
}

impl TestimonialService {
    pub fn new(repo: Arc<dyn TestimonialRepository>) -> Self {
        Self { repo }
    }

    /// What the public site shows
    pub async fn list_featured(&self) -> Result<Vec<Testimonial>, ContentError> {
        Ok(self.repo.list_featured().await?)
    }

    pub async fn list_all(&self) -> Result<Vec<Testimonial>, ContentError> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn create(&self, input: CreateTestimonialInput) -> Result<Testimonial, ContentError> {
        if !all_present(&[input.name.as_str(), input.content.as_str()]) {
            return Err(ContentError::Validation(REQUIRED_FIELDS.to_string()));
        }
        Ok(self.repo.create(&Testimonial::new(input)).await?)
    }

    pub async fn update(
        &self,
        id: &str,
        input: UpdateTestimonialInput,
    ) -> Result<Testimonial, ContentError> {
        if !none_blank(&[input.name.as_ref(), input.content.as_ref()]) {
            return Err(ContentError::Validation(REQUIRED_FIELDS.to_string()));
        }

        let mut testimonial = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("Testimonial"))?;

        if let Some(name) = input.name {
            testimonial.name = name;
        }
        if let Some(content) = input.content {
            testimonial.content = content;
        }
        if let Some(role) = input.role {
            testimonial.role = role;
        }
        if let Some(company) = input.company {
            testimonial.company = company;
        }
        if let Some(avatar) = input.avatar {
            testimonial.avatar = avatar;
        }
        if let Some(rating) = input.rating {
            testimonial.rating = clamp_rating(rating);
        }
        if let Some(featured) = input.is_featured {
            testimonial.is_featured = featured;
        }

        Ok(self.repo.update(&testimonial).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        if !self.repo.delete(id).await? {
            return Err(ContentError::NotFound("Testimonial"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxTestimonialRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup_service() -> TestimonialService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        TestimonialService::new(SqlxTestimonialRepository::boxed(pool))
    }

    fn input(name: &str, rating: Option<i32>) -> CreateTestimonialInput {
        CreateTestimonialInput {
            name: name.to_string(),
            content: "Excellent collaboration".to_string(),
            role: None,
            company: Some("Acme".to_string()),
            avatar: None,
            rating,
            is_featured: None,
        }
    }

    #[tokio::test]
    async fn test_create_clamps_rating_and_features() {
        let service = setup_service().await;
        let t = service.create(input("Jane", Some(11))).await.unwrap();

        assert_eq!(t.rating, 5);
        assert!(t.is_featured);
        assert_eq!(service.list_featured().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_rating_and_unfeature() {
        let service = setup_service().await;
        let t = service.create(input("Jane", None)).await.unwrap();

        let updated = service
            .update(
                &t.id,
                UpdateTestimonialInput {
                    rating: Some(0),
                    is_featured: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.rating, 1);
        assert_eq!(updated.company.as_deref(), Some("Acme"));
        assert!(service.list_featured().await.unwrap().is_empty());
        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_requires_name_and_content() {
        let service = setup_service().await;
        assert!(matches!(
            service.create(input("", None)).await,
            Err(ContentError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_testimonial() {
        let service = setup_service().await;
        assert!(matches!(
            service.delete("nope").await,
            Err(ContentError::NotFound("Testimonial"))
        ));
    }
}
