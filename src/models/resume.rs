//! Resume metadata model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploaded resume; the newest one is the current resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub file_url: String,
    pub file_name: Option<String>,
    /// Current role, used in the assistant prompt
    pub role: Option<String>,
    pub skills: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl Resume {
    pub fn new(input: CreateResumeInput) -> Self {
        Self {
            id: super::new_id(),
            file_url: input.file_url,
            file_name: input.file_name,
            role: input.role,
            skills: input.skills,
            uploaded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeInput {
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
}
