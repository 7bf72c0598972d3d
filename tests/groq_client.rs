use axum::extract::State;
use axum::http::{ HeaderMap, StatusCode };
use axum::response::{ IntoResponse, Response };
use axum::routing::post;
use axum::{ Json, Router };
use curl_assist::llm::chat::groq::GroqChatClient;
use curl_assist::llm::chat::{ ChatClient, CompletionRequest };
use curl_assist::llm::LlmError;
use curl_assist::models::chat::ChatTurn;
use serde_json::{ json, Value as JsonValue };
use std::sync::{ Arc, Mutex };

#[derive(Clone)]
struct MockUpstream {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<(Option<String>, JsonValue)>>>,
}

async fn completions(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    Json(payload): Json<JsonValue>,
) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    mock.seen.lock().unwrap().push((auth, payload));
    (mock.status, mock.body.clone()).into_response()
}

/// Serves `body` with `status` on a random local port; returns the completions URL and the request log.
async fn spawn_upstream(
    status: StatusCode,
    body: &str,
) -> (String, Arc<Mutex<Vec<(Option<String>, JsonValue)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mock = MockUpstream { status, body: body.to_string(), seen: seen.clone() };
    let app = Router::new()
        .route("/openai/v1/chat/completions", post(completions))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/openai/v1/chat/completions", addr), seen)
}

fn request() -> CompletionRequest {
    CompletionRequest {
        model: "mixtral-8x7b-32768".into(),
        messages: vec![ChatTurn::user("What does -k do?").into_message()],
        temperature: 0.7,
        max_tokens: 1000,
    }
}

#[tokio::test]
async fn sends_bearer_token_and_payload() {
    let (url, seen) = spawn_upstream(
        StatusCode::OK,
        r#"{"choices":[{"message":{"role":"assistant","content":"It skips TLS verification."}}]}"#,
    ).await;
    let client = GroqChatClient::new("gsk_test".into(), Some(url)).unwrap();

    let response = client.complete(&request()).await.unwrap();
    assert_eq!(response.content.as_deref(), Some("It skips TLS verification."));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.as_deref(), Some("Bearer gsk_test"));
    assert_eq!(seen[0].1["model"], "mixtral-8x7b-32768");
    assert_eq!(seen[0].1["max_tokens"], 1000);
    assert_eq!(seen[0].1["messages"], json!([{ "role": "user", "content": "What does -k do?" }]));
    let temperature = seen[0].1["temperature"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn missing_choices_yield_no_content() {
    for body in [r#"{"choices":[]}"#, r#"{}"#, r#"{"choices":[{"message":{"content":null}}]}"#] {
        let (url, _) = spawn_upstream(StatusCode::OK, body).await;
        let client = GroqChatClient::new("gsk_test".into(), Some(url)).unwrap();
        let response = client.complete(&request()).await.unwrap();
        assert_eq!(response.content, None, "body {}", body);
    }
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let (url, _) = spawn_upstream(StatusCode::UNAUTHORIZED, r#"{"error":{"message":"invalid key"}}"#).await;
    let client = GroqChatClient::new("bad".into(), Some(url)).unwrap();

    let err = client.complete(&request()).await.unwrap_err();
    match &err {
        LlmError::Upstream { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body, &json!({ "error": { "message": "invalid key" } }));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    assert_eq!(err.upstream_message(), Some("invalid key"));
}

#[tokio::test]
async fn non_json_error_body_is_kept_as_text() {
    let (url, _) = spawn_upstream(StatusCode::BAD_GATEWAY, "upstream unavailable").await;
    let client = GroqChatClient::new("gsk_test".into(), Some(url)).unwrap();

    match client.complete(&request()).await.unwrap_err() {
        LlmError::Upstream { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, json!("upstream unavailable"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn garbage_success_body_is_decode_error() {
    let (url, _) = spawn_upstream(StatusCode::OK, "<html>oops</html>").await;
    let client = GroqChatClient::new("gsk_test".into(), Some(url)).unwrap();
    assert!(matches!(client.complete(&request()).await, Err(LlmError::Decode(_))));
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GroqChatClient::new("gsk_test".into(), Some(format!("http://{}/v1/chat/completions", addr))).unwrap();
    assert!(matches!(client.complete(&request()).await, Err(LlmError::Transport(_))));
}
