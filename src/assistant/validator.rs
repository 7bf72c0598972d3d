use log::{ error, info, warn };
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::reply::interpret_model_reply;
use super::{ AssistantError, CurlAssistant };
use crate::config::prompt::{ get_validation_prompt, VALIDATION_SAMPLING };
use crate::llm::chat::CompletionRequest;
use crate::models::chat::ChatTurn;
use crate::models::validation::ValidationOutcome;

pub const NO_COMMAND: &str = "No curl command provided";

/// Reads `{ "curlCommand": "..." }`. Anything but a non-empty string is invalid input.
pub fn parse_validation_request(body: &[u8]) -> Result<String, AssistantError> {
    let payload: JsonValue = serde_json::from_slice(body)
        .map_err(|e| AssistantError::Unexpected(format!("Invalid JSON body: {}", e)))?;

    match payload.get("curlCommand") {
        Some(JsonValue::String(command)) if !command.is_empty() => Ok(command.clone()),
        _ => Err(AssistantError::InvalidInput(NO_COMMAND)),
    }
}

impl CurlAssistant {
    /// Asks the model to judge `curl_command`. An unparseable reply yields a degraded
    /// outcome rather than an error; only the upstream call itself can fail.
    pub async fn validate(&self, curl_command: &str) -> Result<ValidationOutcome, AssistantError> {
        let client = self.client()?;
        let request_id = Uuid::new_v4();
        info!("[{}] Validating curl command ({} chars)", request_id, curl_command.len());

        let request = CompletionRequest {
            model: self.validator_model.clone(),
            messages: vec![ChatTurn::user(get_validation_prompt(curl_command)).into_message()],
            temperature: VALIDATION_SAMPLING.temperature,
            max_tokens: VALIDATION_SAMPLING.max_tokens,
        };

        let response = client.complete(&request).await.map_err(|e| {
            error!("[{}] Validation completion failed: {}", request_id, e);
            AssistantError::from(e)
        })?;

        let content = response.content.ok_or_else(|| {
            error!("[{}] Upstream response has no message content", request_id);
            AssistantError::Unexpected("Upstream response has no message content".to_string())
        })?;

        let outcome = interpret_model_reply(&content);
        if outcome.is_degraded() {
            warn!("[{}] Failed to parse validation reply as JSON: {}", request_id, content);
        } else if let Some(verdict) = outcome.verdict() {
            info!(
                "[{}] Validation verdict received: valid={} issues={}",
                request_id,
                verdict.is_valid,
                verdict.issues.len()
            );
        } else {
            warn!("[{}] Validation reply is JSON but not in verdict shape; passing it through", request_id);
        }
        Ok(outcome)
    }
}
