use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable consulted when `api_key` is not set in the file.
pub const AI_API_KEY_ENV: &str = "GROK_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer credential; the AI lookup is skipped when absent
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Hard deadline for the completion request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the configured key, treating blank values as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.x.ai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "grok-3".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}
