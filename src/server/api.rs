use crate::assistant::{ AssistantError, CurlAssistant, MISSING_CREDENTIAL_MESSAGE };
use crate::assistant::relay::parse_chat_request;
use crate::assistant::validator::parse_validation_request;
use std::sync::Arc;
use axum::{
    body::Bytes,
    routing::post,
    Router,
    Json,
    extract::State,
    response::{ IntoResponse, Response },
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{ json, Value as JsonValue };
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use log::{ error, info };

const CHAT_API_ERROR: &str = "Chat API error";
const CHAT_FAILED: &str = "Failed to process chat request";
const VALIDATION_FAILED: &str = "Failed to validate curl command";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<JsonValue>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self { error: error.into(), details: None }
    }

    fn with_details(error: impl Into<String>, details: JsonValue) -> Self {
        Self { error: error.into(), details: Some(details) }
    }
}

#[derive(Clone)]
struct AppState {
    assistant: Arc<CurlAssistant>,
}

/// Routes for the chat relay and the curl validator, optionally serving the browser UI from `static_dir`.
pub fn router(assistant: Arc<CurlAssistant>, static_dir: Option<&str>) -> Router {
    let app_state = AppState { assistant };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/validate-curl", post(validate_curl_handler));

    if let Some(dir) = static_dir {
        info!("Serving static files from: {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors).with_state(app_state)
}

fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

fn chat_error_response(err: AssistantError) -> Response {
    let (code, body) = match err {
        AssistantError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
        AssistantError::MissingCredential => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(MISSING_CREDENTIAL_MESSAGE))
        }
        AssistantError::Upstream { status, body } => {
            let message = body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .unwrap_or(CHAT_API_ERROR);
            (upstream_status(status), ErrorResponse::new(message))
        }
        AssistantError::Unexpected(msg) => {
            error!("Chat error: {}", msg);
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(CHAT_FAILED))
        }
    };
    (code, Json(body)).into_response()
}

fn validation_error_response(err: AssistantError) -> Response {
    let (code, body) = match err {
        AssistantError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
        AssistantError::MissingCredential => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(MISSING_CREDENTIAL_MESSAGE))
        }
        AssistantError::Upstream { status, body } => {
            (upstream_status(status), ErrorResponse::with_details(VALIDATION_FAILED, body))
        }
        AssistantError::Unexpected(msg) => {
            error!("Error validating curl: {}", msg);
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::with_details(INTERNAL_ERROR, json!(msg)))
        }
    };
    (code, Json(body)).into_response()
}

async fn chat_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let messages = match parse_chat_request(&body) {
        Ok(messages) => messages,
        Err(e) => return chat_error_response(e),
    };

    match state.assistant.chat(messages).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => chat_error_response(e),
    }
}

async fn validate_curl_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let curl_command = match parse_validation_request(&body) {
        Ok(command) => command,
        Err(e) => return validation_error_response(e),
    };

    match state.assistant.validate(&curl_command).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => validation_error_response(e),
    }
}
