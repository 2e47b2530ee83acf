//! Blog post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: String,
    pub title: String,
    /// URL slug (unique)
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    /// Only published posts are listed publicly
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(input: CreateBlogInput) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            title: input.title,
            slug: input.slug,
            content: input.content,
            excerpt: input.excerpt,
            cover_image: input.cover_image,
            published: input.published.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a blog post
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Defaults to published
    #[serde(default)]
    pub published: Option<bool>,
}

/// Partial update; absent fields are left untouched, `null` clears an
/// optional field
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub excerpt: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub cover_image: Option<Option<String>>,
    pub published: Option<bool>,
}
