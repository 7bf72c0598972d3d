pub mod chat;

use serde_json::Value as JsonValue;
use thiserror::Error;

pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),

    #[error("Invalid completions URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Upstream answered with a non-success status. `body` is its JSON, or the raw text as a JSON string.
    #[error("Upstream returned HTTP {status}")]
    Upstream { status: u16, body: JsonValue },

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

impl LlmError {
    /// The upstream's own `error.message`, when it sent one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            LlmError::Upstream { body, .. } => body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LlmError::Decode(err.to_string())
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}
