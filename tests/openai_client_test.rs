use serde_json::json;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kiosk_assistant::application::ports::{LlmClient, LlmClientError};
use kiosk_assistant::infrastructure::llm::OpenAiClient;
use kiosk_assistant::presentation::config::LlmSettings;

fn client(server: &MockServer) -> OpenAiClient {
    let settings = LlmSettings {
        api_key: "sk-test".to_string(),
        base_url: format!("{}/v1/", server.uri()),
        chat_model: "gpt-4o".to_string(),
        temperature: 0.0,
        max_tokens: 32,
        request_timeout_secs: 5,
    };
    OpenAiClient::new(&settings).unwrap()
}

#[tokio::test]
async fn given_completion_when_calling_then_returns_trimmed_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(bearer_token("sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "messages": [
                { "role": "system", "content": "system" },
                { "role": "user", "content": "user" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": " 여권 발급 신청\n" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).complete("system", "user").await.unwrap();

    assert_eq!(reply, "여권 발급 신청");
}

#[tokio::test]
async fn given_rate_limit_when_calling_then_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = client(&server).complete("system", "user").await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_when_calling_then_api_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let result = client(&server).complete("system", "user").await;

    match result {
        Err(LlmClientError::ApiRequestFailed(message)) => assert!(message.contains("bad key")),
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn given_no_choices_when_calling_then_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result = client(&server).complete("system", "user").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_malformed_body_when_calling_then_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client(&server).complete("system", "user").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}
