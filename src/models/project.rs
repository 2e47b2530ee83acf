//! Project model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Free-form, usually comma separated
    pub technologies: String,
    pub thumbnail: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(input: CreateProjectInput) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            title: input.title,
            description: input.description,
            technologies: input.technologies,
            thumbnail: input.thumbnail,
            live_url: input.live_url,
            github_url: input.github_url,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub thumbnail: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub live_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub github_url: Option<Option<String>>,
}
