use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION}};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use super::{ChatClient, CompletionRequest, CompletionResponse};
use crate::llm::{LlmConfig, LlmError, DEFAULT_COMPLETIONS_URL};

/// Client for Groq's OpenAI-compatible chat completions API.
pub struct GroqChatClient {
    http: HttpClient,
    url: Url,
}

#[derive(Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: Option<GroqMessage>,
}

#[derive(Deserialize)]
struct GroqMessage {
    content: Option<String>,
}

impl GroqChatClient {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
    ) -> Result<Self, LlmError> {
        let api_url = base_url.unwrap_or_else(|| DEFAULT_COMPLETIONS_URL.to_string());
        let url = Url::parse(&api_url).map_err(|e| LlmError::InvalidUrl {
            url: api_url.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| LlmError::InvalidApiKey(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(Self { http, url })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key
            .clone()
            .ok_or(LlmError::MissingApiKey)?;

        Self::new(api_key, config.base_url.clone())
    }
}

/// Keeps the upstream error body as JSON when possible, else as a JSON string of the raw text.
fn error_body(text: String) -> JsonValue {
    serde_json::from_str(&text).unwrap_or(JsonValue::String(text))
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(
        &self,
        request: &CompletionRequest
    ) -> Result<CompletionResponse, LlmError> {
        debug!(
            "POST {} model={} turns={} temperature={} max_tokens={}",
            self.url,
            request.model,
            request.messages.len(),
            request.temperature,
            request.max_tokens
        );

        let resp = self.http.post(self.url.clone())
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body: error_body(text),
            });
        }

        let parsed: GroqResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        let content = parsed.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        Ok(CompletionResponse { content })
    }

    fn get_base_url(&self) -> String {
        self.url.to_string()
    }
}
