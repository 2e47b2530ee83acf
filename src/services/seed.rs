//! Database seeding
//!
//! `seed_defaults` runs at every startup and is idempotent. `seed_sample_content`
//! backs the `seed` binary and fills a fresh database with demo content.

use crate::config::AuthConfig;
use crate::models::{
    Blog, CreateBlogInput, CreateProjectInput, CreateTestimonialInput, Project, Testimonial,
};
use crate::services::{AppServices, ContentError};

const WELCOME_SLUG: &str = "welcome-to-my-portfolio";

const WELCOME_CONTENT: &str = r#"
<h2>Welcome!</h2>
<p>This is a sample blog post created during database seeding. You can edit or delete this post from the admin dashboard.</p>
<p>Key features of this portfolio:</p>
<ul>
  <li>Blog, projects and testimonials managed from one dashboard</li>
  <li>Secure token authentication</li>
  <li>Contact form with email notifications</li>
  <li>An AI assistant that knows the portfolio</li>
</ul>
<p>Feel free to explore the admin dashboard and create your own content!</p>
"#;

/// Seed the default FAQs and the admin account.
///
/// Failures are logged and never stop the server from starting.
pub async fn seed_defaults(services: &AppServices, auth: &AuthConfig) {
    match services.faq_service.seed_defaults().await {
        Ok(0) => {}
        Ok(n) => tracing::info!("Seeded {} default FAQs", n),
        Err(e) => tracing::error!("Failed to seed FAQs: {}", e),
    }

    if let Err(e) = services
        .auth_service
        .ensure_admin(&auth.admin_email, &auth.admin_password, &auth.admin_name)
        .await
    {
        tracing::error!("Failed to seed admin account: {}", e);
    }
}

/// What `seed_sample_content` created
#[derive(Debug, Default)]
pub struct SampleContent {
    pub admin_created: bool,
    pub blog: Option<Blog>,
    pub project: Option<Project>,
    pub testimonial: Option<Testimonial>,
}

/// Create the admin account plus a welcome post, a project and a testimonial.
///
/// The welcome post is skipped when its slug already exists; the project and
/// testimonial are added on every run.
pub async fn seed_sample_content(
    services: &AppServices,
    auth: &AuthConfig,
) -> anyhow::Result<SampleContent> {
    let admin_created = services
        .auth_service
        .ensure_admin(&auth.admin_email, &auth.admin_password, &auth.admin_name)
        .await?;

    let blog = match services
        .blog_service
        .create(CreateBlogInput {
            title: "Welcome to My Portfolio".to_string(),
            slug: WELCOME_SLUG.to_string(),
            content: WELCOME_CONTENT.to_string(),
            excerpt: Some(
                "Welcome to my portfolio! Learn about the amazing features built into this application."
                    .to_string(),
            ),
            cover_image: None,
            published: Some(true),
        })
        .await
    {
        Ok(blog) => Some(blog),
        Err(ContentError::Conflict(_)) => None,
        Err(e) => return Err(e.into()),
    };

    let project = services
        .project_service
        .create(CreateProjectInput {
            title: "Portfolio Website".to_string(),
            description: "A modern portfolio website with a blog, an admin dashboard and an AI assistant that answers questions about the work shown."
                .to_string(),
            technologies: "Rust, Axum, SQLx, SQLite".to_string(),
            thumbnail: Some(
                "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800".to_string(),
            ),
            live_url: Some("https://yourportfolio.com".to_string()),
            github_url: Some("https://github.com/yourusername/portfolio".to_string()),
        })
        .await?;

    let testimonial = services
        .testimonial_service
        .create(CreateTestimonialInput {
            name: "John Doe".to_string(),
            content: "Exceptional work! The attention to detail and technical expertise demonstrated in this portfolio is outstanding."
                .to_string(),
            role: Some("CEO".to_string()),
            company: Some("Tech Innovations Inc.".to_string()),
            avatar: None,
            rating: Some(5),
            is_featured: None,
        })
        .await?;

    Ok(SampleContent {
        admin_created,
        blog,
        project: Some(project),
        testimonial: Some(testimonial),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> (AppServices, AuthConfig) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let mut config = Config::default();
        config.auth.jwt_secret = Some("seed-test-secret".to_string());
        let services = AppServices::build(&config, pool).expect("Failed to build services");
        (services, config.auth)
    }

    #[tokio::test]
    async fn test_seed_defaults_is_idempotent() {
        let (services, auth) = setup().await;

        seed_defaults(&services, &auth).await;
        seed_defaults(&services, &auth).await;

        let faqs = services.faq_service.list().await.unwrap();
        assert_eq!(faqs.len(), crate::services::DEFAULT_FAQS.len());

        let outcome = services
            .auth_service
            .login(&auth.admin_email, &auth.admin_password)
            .await
            .expect("Seeded admin should be able to log in");
        assert_eq!(outcome.user.email, auth.admin_email);
    }

    #[tokio::test]
    async fn test_sample_content() {
        let (services, auth) = setup().await;

        let first = seed_sample_content(&services, &auth).await.unwrap();
        assert!(first.admin_created);
        assert_eq!(first.blog.as_ref().map(|b| b.slug.as_str()), Some(WELCOME_SLUG));
        assert_eq!(first.testimonial.as_ref().map(|t| t.rating), Some(5));

        let second = seed_sample_content(&services, &auth).await.unwrap();
        assert!(!second.admin_created);
        assert!(second.blog.is_none());

        assert_eq!(services.blog_service.list_all().await.unwrap().len(), 1);
        assert_eq!(services.project_service.list().await.unwrap().len(), 2);
        assert_eq!(services.testimonial_service.list_featured().await.unwrap().len(), 2);
    }
}
