//! Integration tests for the suggestion client with a mocked chat API.

use grafis::config::{Config, PLACEHOLDER_API_KEY, PromptMessage};
use grafis::error::SuggestError;
use grafis::llm::SuggestionClient;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A config with a usable key and a one-message prompt template.
fn test_config() -> Config {
    Config {
        api_key: "sk-test".to_string(),
        model: "gpt-4".to_string(),
        prompt: vec![PromptMessage {
            role: "system".to_string(),
            content: "Suggest concise commit messages.".to_string(),
        }],
        max_tokens: 50,
    }
}

/// A 200 response carrying `content` as the only choice.
fn completion_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    }))
}

#[tokio::test]
async fn test_suggest_sends_exactly_one_request_with_diff() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(completion_response("fix: adjust pager"))
        .expect(1)
        .mount(&server)
        .await;

    let client = SuggestionClient::with_base_url(test_config(), server.uri());
    let suggestion = client
        .suggest("diff --git a/pager.rs b/pager.rs", None)
        .await
        .unwrap();

    assert_eq!(suggestion, "fix: adjust pager");

    // The user message carries the diff and follows the prompt template
    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "diff --git a/pager.rs b/pager.rs");
    assert_eq!(body["max_tokens"], 50);
}

#[tokio::test]
async fn test_suggest_appends_context_on_its_own_line() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion_response("feat: add pager"))
        .expect(1)
        .mount(&server)
        .await;

    let client = SuggestionClient::with_base_url(test_config(), server.uri());
    client
        .suggest("diff text here", Some("refs JIRA-42"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user_content = body["messages"][1]["content"].as_str().unwrap();
    assert_eq!(user_content, "diff text here\nAdditional context: refs JIRA-42");
}

#[tokio::test]
async fn test_suggest_uses_configured_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4" })))
        .respond_with(completion_response("chore: tidy"))
        .expect(1)
        .mount(&server)
        .await;

    let client = SuggestionClient::with_base_url(test_config(), server.uri());
    client.suggest("some diff", None).await.unwrap();
}

#[tokio::test]
async fn test_suggest_falls_back_when_model_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(completion_response("chore: tidy"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config();
    config.model = String::new();

    let client = SuggestionClient::with_base_url(config, server.uri());
    client.suggest("some diff", None).await.unwrap();
}

#[tokio::test]
async fn test_suggest_strips_plaintext_fence() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion_response(
            "```plaintext\nfix: handle empty diff\n```",
        ))
        .mount(&server)
        .await;

    let client = SuggestionClient::with_base_url(test_config(), server.uri());
    let suggestion = client.suggest("some diff", None).await.unwrap();

    assert_eq!(suggestion, "fix: handle empty diff");
}

#[tokio::test]
async fn test_placeholder_api_key_aborts_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(completion_response("should never be returned"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config();
    config.api_key = PLACEHOLDER_API_KEY.to_string();

    let client = SuggestionClient::with_base_url(config, server.uri());
    let result = client.suggest("some diff", None).await;

    match result {
        Err(SuggestError::ApiKeyNotConfigured(file)) => assert_eq!(file, ".grafis.json"),
        other => panic!("Expected ApiKeyNotConfigured, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_api_key_aborts_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(completion_response("should never be returned"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config();
    config.api_key = String::new();

    let client = SuggestionClient::with_base_url(config, server.uri());
    let result = client.suggest("some diff", None).await;

    assert!(matches!(result, Err(SuggestError::ApiKeyNotConfigured(_))));
}

#[tokio::test]
async fn test_http_error_maps_to_status_error_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SuggestionClient::with_base_url(test_config(), server.uri());
    let result = client.suggest("some diff", None).await;

    match result {
        Err(SuggestError::HttpStatus { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Incorrect API key"));
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_response_without_choices_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = SuggestionClient::with_base_url(test_config(), server.uri());
    let result = client.suggest("some diff", None).await;

    assert!(matches!(result, Err(SuggestError::EmptyResponse)));
}

#[tokio::test]
async fn test_malformed_response_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = SuggestionClient::with_base_url(test_config(), server.uri());
    let result = client.suggest("some diff", None).await;

    assert!(matches!(result, Err(SuggestError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_max_tokens_override_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "max_tokens": 200 })))
        .respond_with(completion_response("feat: widen budget"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config();
    config.max_tokens = 200;

    let client = SuggestionClient::with_base_url(config, server.uri());
    client.suggest("some diff", None).await.unwrap();
}
