//! Shared error type for the content services

/// Error returned by the blog, project, testimonial, resume, message and
/// FAQ services
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Entity name, e.g. "Blog"
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// True when every value has something besides whitespace
pub(crate) fn all_present(values: &[&str]) -> bool {
    values.iter().all(|v| !v.trim().is_empty())
}

/// True when every provided value is non-blank; absent values are fine
pub(crate) fn none_blank(values: &[Option<&String>]) -> bool {
    values.iter().flatten().all(|v| !v.trim().is_empty())
}
