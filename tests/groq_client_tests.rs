use doctor_assistant::services::assistant::{build_conversation, settings, SYSTEM_PROMPT};
use doctor_assistant::services::completion::{CompletionProvider, ProviderError};
use doctor_assistant::services::groq::GroqClient;

use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GroqClient {
    GroqClient::new("gsk_test", format!("{}/openai/v1", server.uri()), None).unwrap()
}

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "llama-3.3-70b-versatile",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" },
            { "index": 1, "message": { "role": "assistant", "content": "second choice" }, "finish_reason": "stop" }
        ]
    })
}

#[tokio::test]
async fn sends_bearer_key_and_fixed_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Start with a thiazide.")))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server)
        .complete(&build_conversation("First-line for hypertension?"), &settings())
        .await
        .unwrap();
    assert_eq!(reply, "Start with a thiazide.");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "llama-3.3-70b-versatile");
    assert_eq!(body["temperature"], 0.3);
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(
        body["messages"],
        json!([
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": "First-line for hypertension?" }
        ])
    );
}

#[tokio::test]
async fn unauthorized_is_rejected_with_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Invalid API Key", "type": "invalid_request_error", "code": "invalid_api_key" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&build_conversation("hi"), &settings())
        .await
        .unwrap_err();

    match err {
        ProviderError::Rejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API Key");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn too_many_requests_is_rate_limited_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "30")
                .set_body_string("Rate limit reached for model"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&build_conversation("hi"), &settings())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::RateLimited { ref message, retry_after: Some(d) }
            if message == "Rate limit reached for model" && d == Duration::from_secs(30)
    ));
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&build_conversation("hi"), &settings())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable(ref m) if m == "over capacity"));
}

#[tokio::test]
async fn malformed_bodies_are_classified() {
    for body in [
        ResponseTemplate::new(200).set_body_string("not json"),
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(body).mount(&server).await;

        let err = client(&server)
            .complete(&build_conversation("hi"), &settings())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)), "got {err:?}");
    }
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = GroqClient::new(
        "gsk_test",
        format!("{}/openai/v1", server.uri()),
        Some(Duration::from_millis(200)),
    )
    .unwrap();

    let err = client
        .complete(&build_conversation("hi"), &settings())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_provider_is_unavailable() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base_url = format!("http://127.0.0.1:{port}/openai/v1");

    let err = GroqClient::new("gsk_test", base_url, None)
        .unwrap()
        .complete(&build_conversation("hi"), &settings())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable(_)), "got {err:?}");
}
