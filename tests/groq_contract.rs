//! Groq provider contract tests.
//!
//! Verify the exact request the provider sends to an OpenAI-compatible
//! `/chat/completions` endpoint and how each upstream answer maps onto
//! [`ChatError`].

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use joseai::config::LlmConfig;
use joseai::llm::{ChatError, ChatProvider, GroqChatProvider};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

fn provider_for(server: &MockServer, api_key: &str) -> GroqChatProvider {
    GroqChatProvider::new(LlmConfig {
        api_url: format!("{}/openai/v1", server.uri()),
        api_key: api_key.to_owned(),
        timeout_secs: 5,
        ..LlmConfig::default()
    })
    .unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama-3.1-8b-instant",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Request format
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn request_carries_fixed_sampling_and_bearer_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer gsk-test"))
        .and(body_partial_json(json!({
            "model": "llama-3.1-8b-instant",
            "temperature": 0.7,
            "max_tokens": 1000,
            "top_p": 1.0,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hai!")))
        .expect(1)
        .mount(&server)
        .await;

    let reply = provider_for(&server, "gsk-test")
        .complete("Hello")
        .await
        .unwrap();
    assert_eq!(reply, "Hai!");
}

#[tokio::test]
async fn request_sends_system_prompt_then_user_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system"},
                {"role": "user", "content": "  spaced message  "}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .expect(1)
        .mount(&server)
        .await;

    provider_for(&server, "gsk-test")
        .complete("  spaced message  ")
        .await
        .unwrap();
}

#[tokio::test]
async fn reply_is_returned_verbatim() {
    let server = MockServer::start().await;
    let text = "  **Jawaban:**\n\n1. satu\n2. dua  ";

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(text)))
        .mount(&server)
        .await;

    let reply = provider_for(&server, "gsk-test").complete("x").await.unwrap();
    assert_eq!(reply, text);
}

// ────────────────────────────────────────────────────────────────────────────
// Error mapping
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn blank_key_never_reaches_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let err = provider_for(&server, "   ").complete("hi").await.unwrap_err();
    assert!(matches!(err, ChatError::Credential(_)));
    assert_eq!(err.code(), "CREDENTIAL_FAILED");
}

#[tokio::test]
async fn unauthorized_maps_to_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid API Key", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server, "gsk-bad")
        .complete("hi")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CREDENTIAL_FAILED");
    assert!(err.message().contains("Invalid API Key"));
    assert!(err.user_message().contains("GROQ API key"));
}

#[tokio::test]
async fn server_error_maps_to_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = provider_for(&server, "gsk-test")
        .complete("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Upstream(_)));
    assert_eq!(err.message(), "HTTP 500: internal");
    assert!(err.user_message().starts_with("Maaf"));
}

#[tokio::test]
async fn rate_limit_maps_to_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached"}
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server, "gsk-test")
        .complete("hi")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "UPSTREAM_FAILED");
    assert!(err.message().contains("Rate limit reached"));
}

#[tokio::test]
async fn missing_choices_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
        .mount(&server)
        .await;

    let err = provider_for(&server, "gsk-test")
        .complete("hi")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "MALFORMED_RESPONSE");
}

#[tokio::test]
async fn non_json_success_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server, "gsk-test")
        .complete("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_host_maps_to_upstream() {
    let provider = GroqChatProvider::new(LlmConfig {
        api_url: "http://127.0.0.1:9/openai/v1".to_owned(),
        api_key: "gsk-test".to_owned(),
        timeout_secs: 2,
        ..LlmConfig::default()
    })
    .unwrap();

    let err = provider.complete("hi").await.unwrap_err();
    assert_eq!(err.code(), "UPSTREAM_FAILED");
}
