use scholia_llm::{
    ChatClient, ChatOptions, ChatRequest, FailureKind, GenerationError, Message, OpenAIClient,
    RetryPolicy, RetryingClient,
};
use std::time::Duration;

const COMPLETION: &str = r###"{
    "id": "gen-1",
    "model": "x-ai/grok-4.1-fast",
    "choices": [
        {"index": 0, "message": {"role": "assistant", "content": "## I. Syllabus Contextualization"}, "finish_reason": "stop"}
    ],
    "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
}"###;

fn request() -> ChatRequest {
    ChatRequest::new("x-ai/grok-4.1-fast", vec![Message::system("sys"), Message::human("text")])
        .with_options(ChatOptions::new().temperature(0.7).max_tokens(100))
}

fn client(server: &mockito::Server) -> OpenAIClient {
    OpenAIClient::with_settings("sk-or-v1-test", server.url(), Duration::from_secs(5)).unwrap()
}

fn fast_retries(attempts: usize) -> RetryPolicy {
    RetryPolicy::new(attempts).with_delays(Duration::ZERO, Duration::ZERO)
}

#[tokio::test]
async fn test_chat_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-or-v1-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION)
        .create_async()
        .await;

    let response = client(&server).chat(request()).await.unwrap();

    assert_eq!(response.content, "## I. Syllabus Contextualization");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 150);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auth_failure_is_classified() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error": "invalid key"}"#)
        .create_async()
        .await;

    let err = client(&server).chat(request()).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Auth);
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_empty_content_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": ""}, "finish_reason": "stop"}]}"#)
        .create_async()
        .await;

    let err = client(&server).chat(request()).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn test_rate_limit_retried_until_exhausted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_header("retry-after", "1")
        .expect(3)
        .create_async()
        .await;

    let retrying = RetryingClient::new(client(&server), fast_retries(3));
    let err = retrying.chat(request()).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::RateLimit);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auth_failure_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let retrying = RetryingClient::new(client(&server), fast_retries(3));
    let err = retrying.chat(request()).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Auth);
    mock.assert_async().await;
}
