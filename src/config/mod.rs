//! Configuration management
//!
//! This module handles loading and parsing configuration for the portfolio backend.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults. Empty environment
//! values are treated as absent.

use serde::{Deserialize, Serialize};

/// Placeholder shipped in the example `.env`; treated as "no key".
pub const OPENAI_KEY_PLACEHOLDER: &str = "your_openai_api_key_here";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Contact notification mail
    #[serde(default)]
    pub mail: MailConfig,
    /// `/api/chat` assistant (OpenAI-compatible)
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// `/api/chatbot` gateway chatbot
    #[serde(default)]
    pub chatbot: ChatbotConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database driver (sqlite or mysql)
    #[serde(default)]
    pub driver: DatabaseDriver,
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/portfolio.db".to_string()
}

/// Database driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    /// SQLite (default)
    #[default]
    Sqlite,
    /// MySQL
    Mysql,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to sign bearer tokens
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Seeded admin account
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_hours: default_token_ttl_hours(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            admin_name: default_admin_name(),
        }
    }
}

fn default_token_ttl_hours() -> i64 {
    24 * 7
}

fn default_admin_email() -> String {
    "admin@portfolio.com".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

/// SMTP configuration for contact notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_user: Option<String>,
    #[serde(default)]
    pub smtp_pass: Option<String>,
    /// Recipient of contact notifications (falls back to `smtp_user`)
    #[serde(default)]
    pub notification_email: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_user: None,
            smtp_pass: None,
            notification_email: None,
        }
    }
}

impl MailConfig {
    /// Mail is only sent when both SMTP credentials are present
    pub fn is_enabled(&self) -> bool {
        self.smtp_user.is_some() && self.smtp_pass.is_some()
    }

    pub fn recipient(&self) -> Option<&str> {
        self.notification_email
            .as_deref()
            .or(self.smtp_user.as_deref())
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

/// Settings for the `/api/chat` assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_assistant_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Name the assistant speaks for
    #[serde(default = "default_owner_name")]
    pub owner_name: String,
    /// Address the assistant hands out for contact
    #[serde(default)]
    pub contact_email: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_assistant_model(),
            max_tokens: default_max_tokens(),
            owner_name: default_owner_name(),
            contact_email: None,
        }
    }
}

impl AssistantConfig {
    /// Whether the configured key is worth sending to the provider
    pub fn has_usable_key(&self) -> bool {
        self.usable_key().is_some()
    }

    pub fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != OPENAI_KEY_PLACEHOLDER)
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_assistant_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_owner_name() -> String {
    "the portfolio owner".to_string()
}

/// Settings for the `/api/chatbot` gateway chatbot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Full chat-completions endpoint of the gateway
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    #[serde(default = "default_gateway_model")]
    pub model: String,
    /// Model name reported back to clients
    #[serde(default = "default_reported_model")]
    pub reported_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sent as `HTTP-Referer`
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Sent as `X-Title`
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// Number of prior turns forwarded to the model
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            gateway_url: default_gateway_url(),
            model: default_gateway_model(),
            reported_model: default_reported_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            frontend_url: default_frontend_url(),
            app_title: default_app_title(),
            history_window: default_history_window(),
        }
    }
}

fn default_gateway_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_gateway_model() -> String {
    "google/gemini-2.0-flash-exp:free".to_string()
}

fn default_reported_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_frontend_url() -> String {
    "http://localhost:3002".to_string()
}

fn default_app_title() -> String {
    "Portfolio Chatbot".to_string()
}

fn default_history_window() -> usize {
    10
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist or is empty, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Recognised variables: PORT, HOST, CORS_ORIGINS, DATABASE_URL,
    /// DATABASE_DRIVER, JWT_SECRET, ADMIN_EMAIL, ADMIN_PASSWORD, SMTP_HOST,
    /// SMTP_PORT, SMTP_USER, SMTP_PASS, NOTIFICATION_EMAIL, OPENAI_API_KEY,
    /// OPENAI_BASE_URL, PORTFOLIO_OWNER, PORTFOLIO_CONTACT_EMAIL,
    /// GEMINI_API_KEY, CHATBOT_GATEWAY_URL, FRONTEND_URL.
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        // Server
        if let Some(host) = env_value("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_value("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Some(origins) = env_value("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        // Database
        if let Some(url) = env_value("DATABASE_URL") {
            if url.starts_with("mysql://") {
                self.database.driver = DatabaseDriver::Mysql;
            }
            self.database.url = url;
        }
        if let Some(driver) = env_value("DATABASE_DRIVER") {
            match driver.to_lowercase().as_str() {
                "sqlite" => self.database.driver = DatabaseDriver::Sqlite,
                "mysql" => self.database.driver = DatabaseDriver::Mysql,
                _ => {} // Ignore invalid values
            }
        }

        // Auth
        if let Some(secret) = env_value("JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Some(email) = env_value("ADMIN_EMAIL") {
            self.auth.admin_email = email;
        }
        if let Some(password) = env_value("ADMIN_PASSWORD") {
            self.auth.admin_password = password;
        }

        // Mail
        if let Some(host) = env_value("SMTP_HOST") {
            self.mail.smtp_host = host;
        }
        if let Some(port) = env_value("SMTP_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.mail.smtp_port = port;
            }
        }
        if let Some(user) = env_value("SMTP_USER") {
            self.mail.smtp_user = Some(user);
        }
        if let Some(pass) = env_value("SMTP_PASS") {
            self.mail.smtp_pass = Some(pass);
        }
        if let Some(email) = env_value("NOTIFICATION_EMAIL") {
            self.mail.notification_email = Some(email);
        }

        // Assistant
        if let Some(key) = env_value("OPENAI_API_KEY") {
            self.assistant.api_key = Some(key);
        }
        if let Some(url) = env_value("OPENAI_BASE_URL") {
            self.assistant.base_url = url;
        }
        if let Some(owner) = env_value("PORTFOLIO_OWNER") {
            self.assistant.owner_name = owner;
        }
        if let Some(email) = env_value("PORTFOLIO_CONTACT_EMAIL") {
            self.assistant.contact_email = Some(email);
        }

        // Chatbot
        if let Some(key) = env_value("GEMINI_API_KEY") {
            self.chatbot.api_key = Some(key);
        }
        if let Some(url) = env_value("CHATBOT_GATEWAY_URL") {
            self.chatbot.gateway_url = url;
        }
        if let Some(url) = env_value("FRONTEND_URL") {
            self.chatbot.frontend_url = url;
        }
    }
}

/// Read an environment variable, treating empty values as unset
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
