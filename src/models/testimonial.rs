//! Testimonial model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Client testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub avatar: Option<String>,
    /// 1..=5
    pub rating: i32,
    /// Only featured testimonials are listed publicly
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Testimonial {
    pub fn new(input: CreateTestimonialInput) -> Self {
        Self {
            id: super::new_id(),
            name: input.name,
            role: input.role,
            company: input.company,
            content: input.content,
            avatar: input.avatar,
            rating: clamp_rating(input.rating.unwrap_or(MAX_RATING)),
            is_featured: input.is_featured.unwrap_or(true),
            created_at: Utc::now(),
        }
    }
}

pub(crate) fn clamp_rating(rating: i32) -> i32 {
    rating.clamp(MIN_RATING, MAX_RATING)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonialInput {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub company: Option<Option<String>>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub avatar: Option<Option<String>>,
    pub rating: Option<i32>,
    pub is_featured: Option<bool>,
}
