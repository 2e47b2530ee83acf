//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod blog;
pub mod faq;
pub mod message;
pub mod project;
pub mod resume;
pub mod testimonial;
pub mod user;

pub use blog::{BlogRepository, SqlxBlogRepository};
pub use faq::{FaqRepository, SqlxFaqRepository};
pub use message::{MessageRepository, SqlxMessageRepository};
pub use project::{ProjectRepository, SqlxProjectRepository};
pub use resume::{ResumeRepository, SqlxResumeRepository};
pub use testimonial::{SqlxTestimonialRepository, TestimonialRepository};
pub use user::{SqlxUserRepository, UserRepository};
