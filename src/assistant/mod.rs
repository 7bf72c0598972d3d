pub mod relay;
pub mod reply;
pub mod validator;

use log::{ info, warn };
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;

use crate::cli::Args;
use crate::llm::chat::{ new_client as new_chat_client, ChatClient };
use crate::llm::{ LlmConfig, LlmError };

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Groq API key not configured";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Groq API key not configured")]
    MissingCredential,

    #[error("Upstream returned HTTP {status}")]
    Upstream { status: u16, body: JsonValue },

    #[error("{0}")]
    Unexpected(String),
}

impl From<LlmError> for AssistantError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Upstream { status, body } => AssistantError::Upstream { status, body },
            other => AssistantError::Unexpected(other.to_string()),
        }
    }
}

/// Shared by both endpoints. Holds no per-request state; every call is independent.
#[derive(Clone)]
pub struct CurlAssistant {
    client: Option<Arc<dyn ChatClient>>,
    chat_model: String,
    validator_model: String,
}

impl CurlAssistant {
    /// `client` is `None` when no credential is configured; calls then fail with `MissingCredential`.
    pub fn new(
        client: Option<Arc<dyn ChatClient>>,
        chat_model: impl Into<String>,
        validator_model: impl Into<String>
    ) -> Self {
        Self {
            client,
            chat_model: chat_model.into(),
            validator_model: validator_model.into(),
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, LlmError> {
        let client = match args.api_key() {
            Some(api_key) => {
                let config = LlmConfig {
                    api_key: Some(api_key),
                    base_url: Some(args.completions_url.clone()),
                };
                let client = new_chat_client(&config)?;
                info!("Completions client configured: URL={}", client.get_base_url());
                Some(client)
            }
            None => {
                warn!("{}. Chat and validation requests will fail until it is set.", MISSING_CREDENTIAL_MESSAGE);
                None
            }
        };

        info!("Chat model: {}, Validator model: {}", args.chat_model, args.validator_model);
        Ok(Self::new(client, args.chat_model.clone(), args.validator_model.clone()))
    }

    fn client(&self) -> Result<&Arc<dyn ChatClient>, AssistantError> {
        self.client.as_ref().ok_or(AssistantError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_llm_error_keeps_status_and_body() {
        let err: AssistantError = LlmError::Upstream { status: 429, body: json!({ "error": {} }) }.into();
        assert!(matches!(err, AssistantError::Upstream { status: 429, .. }));
    }

    #[test]
    fn transport_llm_error_is_unexpected() {
        let err: AssistantError = LlmError::Transport("connection refused".into()).into();
        match err {
            AssistantError::Unexpected(msg) => assert!(msg.contains("connection refused")),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn from_args_without_key_has_no_client() {
        let args = <Args as clap::Parser>::try_parse_from(["curl-assist"]).unwrap();
        let args = Args { groq_api_key: None, ..args };
        let assistant = CurlAssistant::from_args(&args).unwrap();
        assert!(matches!(assistant.client(), Err(AssistantError::MissingCredential)));
        assert_eq!(assistant.chat_model, "mixtral-8x7b-32768");
    }

    #[test]
    fn from_args_with_key_builds_client() {
        let args = <Args as clap::Parser>::try_parse_from([
            "curl-assist",
            "--groq-api-key",
            "gsk_test",
            "--completions-url",
            "http://127.0.0.1:9/v1/chat/completions",
        ]).unwrap();
        let assistant = CurlAssistant::from_args(&args).unwrap();
        assert_eq!(
            assistant.client().unwrap().get_base_url(),
            "http://127.0.0.1:9/v1/chat/completions"
        );
    }
}
