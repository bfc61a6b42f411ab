//! HTTP-level tests for the Kronos client and runner against a mock server.

#![allow(clippy::unwrap_used, clippy::panic)]

use kronos::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Kronos {
    Kronos::new(KronosConfig::new("test-key").with_base_url(format!("{}/v1", server.uri())))
        .expect("client")
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "hermes",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn sends_documented_request_shape() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "prompt": "Generate a simple recipe for banana bread",
            "model": "hermes",
            "temperature": 0.7,
            "is_stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Mix bananas and flour.")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Runner::default().run(&client_for(&server)).await;

    assert_eq!(
        outcome.to_json_line()?,
        r#"{"success": true, "response": "Mix bananas and flour."}"#
    );
    Ok(())
}

#[tokio::test]
async fn auth_failure_reports_provider_message() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": {"message": "invalid api key", "type": "auth"}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .chat(&ChatRequest::new("hermes").prompt("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err.as_llm(), Some(LlmError::Auth { .. })));

    let outcome = Runner::default().run(&client).await;
    assert_eq!(
        outcome.to_json_line()?,
        r#"{"success": false, "error": "invalid api key"}"#
    );
    Ok(())
}

#[tokio::test]
async fn rate_limit_keeps_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"detail": "slow down"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat(&ChatRequest::new("hermes").prompt("hi"))
        .await
        .unwrap_err();

    let llm = err.as_llm().expect("llm error");
    assert!(matches!(llm, LlmError::RateLimited { .. }));
    assert_eq!(err.to_string(), "slow down");
}

#[tokio::test]
async fn unstructured_error_body_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let outcome = Runner::default().run(&client_for(&server)).await;
    assert_eq!(outcome, Outcome::failure("HTTP 503: upstream unavailable"));
}

#[tokio::test]
async fn malformed_success_body_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat(&ChatRequest::new("hermes").prompt("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err.as_llm(), Some(LlmError::ResponseFormat { .. })));
}

#[tokio::test]
async fn empty_choices_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let outcome = Runner::default().run(&client_for(&server)).await;
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn streaming_is_rejected_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("x")))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat(&ChatRequest::new("hermes").prompt("hi").stream(true))
        .await
        .unwrap_err();
    assert!(matches!(err.as_llm(), Some(LlmError::NotSupported(_))));
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    let client = Kronos::new(KronosConfig::new("test-key").with_base_url("http://127.0.0.1:1/v1"))
        .expect("client");

    let err = client
        .chat(&ChatRequest::new("hermes").prompt("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err.as_llm(), Some(LlmError::Network(_))));

    let outcome = Runner::default().run(&client).await;
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn recipe_generator_round_trip() {
    let server = MockServer::start().await;

    let reply = json!({"recipes": [{"title": "Banana Bread", "cookTime": 60}]}).to_string();
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&reply)))
        .mount(&server)
        .await;

    let generator = RecipeGenerator::new(client_for(&server));
    let recipes = generator
        .generate(&[FoodItem::new("Banana", 3.0, "pcs")])
        .await;

    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "Banana Bread");
    assert_eq!(recipes[0].cook_time, 60);
    assert_eq!(recipes[0].servings, 4);
}

#[tokio::test]
async fn recipe_generator_falls_back_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let generator = RecipeGenerator::new(client_for(&server));
    let recipes = generator
        .generate(&[FoodItem::new("Tomato", 2.0, "pcs")])
        .await;

    assert_eq!(recipes[0].title, "Quick Vegetable Stir-Fry");
}
