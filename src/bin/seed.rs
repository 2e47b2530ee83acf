//! Fill the database with sample content
//!
//! Creates the admin account, a welcome blog post, a sample project and a
//! sample testimonial. Run with `cargo run --bin seed`.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::{
    config::Config,
    db,
    services::{seed, AppServices},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting database seeding...");

    let config = Config::load_with_env(Path::new("config.yml"))?;
    let pool = db::create_pool(&config.database).await?;
    db::migrations::run_migrations(&pool).await?;

    let services = AppServices::build(&config, pool.clone())?;
    let result = seed::seed_sample_content(&services, &config.auth).await;
    pool.close().await;
    let content = result?;

    if content.admin_created {
        tracing::info!("Created admin user: {}", config.auth.admin_email);
    } else {
        tracing::info!("Admin user already exists: {}", config.auth.admin_email);
    }
    match &content.blog {
        Some(blog) => tracing::info!("Created sample blog post: {}", blog.title),
        None => tracing::info!("Sample blog post already exists"),
    }
    if let Some(project) = &content.project {
        tracing::info!("Created sample project: {}", project.title);
    }
    if let Some(testimonial) = &content.testimonial {
        tracing::info!("Created sample testimonial: {}", testimonial.name);
    }

    tracing::info!("Database seeding completed. Change the admin password after first login!");
    Ok(())
}
