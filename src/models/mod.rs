//! Data models
//!
//! Database entities of the portfolio (User, Blog, Project, Testimonial,
//! Resume, Message, Faq) and the input types the API accepts for them.
//! Entities serialise camelCase, matching what the frontend consumes.

mod blog;
mod faq;
mod message;
mod project;
mod resume;
mod testimonial;
mod user;

pub use blog::{Blog, CreateBlogInput, UpdateBlogInput};
pub use faq::{CreateFaqInput, Faq};
pub use message::{ContactInput, Message};
pub use project::{CreateProjectInput, Project, UpdateProjectInput};
pub use resume::{CreateResumeInput, Resume};
pub use testimonial::{
    CreateTestimonialInput, Testimonial, UpdateTestimonialInput, MAX_RATING, MIN_RATING,
};
pub(crate) use testimonial::clamp_rating;
pub use user::{PublicUser, User};

/// Deserialize a field where `null` means "clear" and absence means "keep".
///
/// Use with `#[serde(default, deserialize_with = "...")]` so a missing field
/// stays `None` while an explicit `null` becomes `Some(None)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Fresh identifier for a new record
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
