//! Model provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// Anthropic Messages API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable)
    pub api_key: Option<String>,
    pub base_url: String,
    /// `anthropic-version` header
    pub api_version: String,
    /// Max tokens per reply
    pub max_tokens: u32,
    /// Per-request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Pause before every request, in seconds
    pub sleep_time: f64,
    /// Retries on 429 / 5xx before giving up
    pub max_retries: u32,
    /// First retry delay in seconds; doubles on every attempt
    pub retry_backoff_seconds: f64,
    /// In-flight request limit across all debates
    pub max_concurrent_requests: usize,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            api_version: "2023-06-01".to_string(),
            max_tokens: 2048,
            timeout_seconds: Some(120),
            sleep_time: 0.0,
            max_retries: 5,
            retry_backoff_seconds: 2.0,
            max_concurrent_requests: 4,
        }
    }
}

impl FileProviderConfig {
    /// `api_key` when set, otherwise the `api_key_env` variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
