use log::{ error, info };
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::{ AssistantError, CurlAssistant };
use crate::config::prompt::CHAT_SAMPLING;
use crate::llm::chat::CompletionRequest;
use crate::models::chat::ChatReply;

pub const INVALID_MESSAGES: &str = "Invalid messages format";
pub const NO_RESPONSE: &str = "No response generated";

/// Reads `{ "messages": [...] }`. A body that is not JSON at all is an unexpected error;
/// a missing or non-array `messages` value is invalid input. Array elements are kept as sent.
pub fn parse_chat_request(body: &[u8]) -> Result<Vec<JsonValue>, AssistantError> {
    let payload: JsonValue = serde_json::from_slice(body)
        .map_err(|e| AssistantError::Unexpected(format!("Invalid JSON body: {}", e)))?;

    match payload {
        JsonValue::Object(mut fields) => match fields.remove("messages") {
            Some(JsonValue::Array(messages)) => Ok(messages),
            _ => Err(AssistantError::InvalidInput(INVALID_MESSAGES)),
        },
        _ => Err(AssistantError::InvalidInput(INVALID_MESSAGES)),
    }
}

impl CurlAssistant {
    /// Forwards the conversation upstream and returns the first choice's text.
    pub async fn chat(&self, messages: Vec<JsonValue>) -> Result<ChatReply, AssistantError> {
        let client = self.client()?;
        let request_id = Uuid::new_v4();
        info!("[{}] Sending chat request upstream with {} messages", request_id, messages.len());

        let request = CompletionRequest {
            model: self.chat_model.clone(),
            messages,
            temperature: CHAT_SAMPLING.temperature,
            max_tokens: CHAT_SAMPLING.max_tokens,
        };

        let response = client.complete(&request).await.map_err(|e| {
            error!("[{}] Chat completion failed: {}", request_id, e);
            AssistantError::from(e)
        })?;

        info!("[{}] Chat response received", request_id);
        let content = response.content
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| NO_RESPONSE.to_string());

        Ok(ChatReply { content })
    }
}
