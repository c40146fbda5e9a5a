//! Service configuration from the environment

use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11437/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "dolphin3:8b";
pub const DEFAULT_SYSTEM_PROMPT: &str = "you are an hacker.";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OLLAMA_URL is not a valid URL ({value}): {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completion endpoint
    pub ollama_url: Url,
    /// Model used when the session has not selected one
    pub default_model: String,
    pub system_prompt: String,
    pub admin_username: String,
    pub admin_password: String,
    pub port: u16,
    /// Transport timeout for upstream requests
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let raw_url = get("OLLAMA_URL", DEFAULT_OLLAMA_URL);
        let ollama_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidUrl {
            value: raw_url.clone(),
            reason: e.to_string(),
        })?;

        let port = match lookup("CHAT_PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "CHAT_PORT",
                    value,
                })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("OLLAMA_TIMEOUT_SECS") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "OLLAMA_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            ollama_url,
            default_model: get("MODEL", DEFAULT_MODEL),
            system_prompt: get("SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT),
            admin_username: get("ADMIN_USERNAME", "admin"),
            admin_password: get("ADMIN_PASSWORD", "secret"),
            port,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
