//! Gate behavior against a mock chat-completions endpoint
//!
//! Exercises the validate / attempt / classify / retry-once contract,
//! including exact call counts and the backoff delay before the retry.

use std::time::{Duration, Instant};

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use serde_json::json;
use taskmate_rs::config::AiConfig;
use taskmate_rs::{FailureKind, MotivationGate, MotivationOutcome};

use crate::common::{ai_config, chat_body};

fn gate_for(server: &MockServer) -> MotivationGate {
    MotivationGate::new(ai_config(&server.uri())).expect("gate creation")
}

#[tokio::test]
async fn test_success_returns_trimmed_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 120
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("  You got this!  ")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gate_for(&server).request_motivation("Buy groceries").await;
    assert_eq!(outcome, MotivationOutcome::success("You got this!"));
}

#[tokio::test]
async fn test_prompt_embeds_subject_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "You are a concise, practical assistant." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("Nice.")))
        .expect(1)
        .mount(&server)
        .await;

    // The subject arrives trimmed inside the user prompt.
    let requests_before = server.received_requests().await.unwrap().len();
    assert_eq!(requests_before, 0);

    let outcome = gate_for(&server).request_motivation("  Buy groceries  ").await;
    assert!(outcome.is_success());

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user_content = body["messages"][1]["content"].as_str().unwrap();
    assert!(user_content.contains("The user has a task: \"Buy groceries\"."));
}

#[tokio::test]
async fn test_invalid_input_makes_no_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let gate = gate_for(&server);
    for subject in ["", "   ", "\t\n"] {
        let outcome = gate.request_motivation(subject).await;
        assert_eq!(outcome.failure_kind(), Some(FailureKind::InvalidInput));
    }
}

#[tokio::test]
async fn test_not_configured_makes_no_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let config = AiConfig {
        api_key: None,
        api_base: server.uri(),
        ..AiConfig::default()
    };
    let gate = MotivationGate::new(config).unwrap();

    let outcome = gate.request_motivation("Buy groceries").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::NotConfigured));
}

#[tokio::test]
async fn test_quota_exceeded_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gate_for(&server).request_motivation("Buy groceries").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::QuotaExceeded));
}

#[tokio::test]
async fn test_server_error_then_success_retries_after_backoff() {
    let server = MockServer::start().await;

    // First attempt sees a 503, the retry lands on the healthy mock.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("Keep going!")))
        .expect(1)
        .mount(&server)
        .await;

    let start = Instant::now();
    let outcome = gate_for(&server).request_motivation("Buy groceries").await;

    assert_eq!(outcome, MotivationOutcome::success("Keep going!"));
    // The second call fires no earlier than the fixed backoff.
    assert!(start.elapsed() >= Duration::from_millis(600));
}

#[tokio::test]
async fn test_server_error_twice_exhausts_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    let outcome = gate_for(&server).request_motivation("Buy groceries").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::TransientError));
}

#[tokio::test]
async fn test_quota_on_second_attempt_is_still_transient() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    // The retry exhausts the policy whatever the second classification is.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gate_for(&server).request_motivation("Buy groceries").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::TransientError));
}

#[tokio::test]
async fn test_empty_message_is_unknown_error_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gate_for(&server).request_motivation("Buy groceries").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::UnknownError));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gate_for(&server).request_motivation("Buy groceries").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::UnknownError));
}

#[tokio::test]
async fn test_timeout_is_retried_as_network_failure() {
    let server = MockServer::start().await;

    // Slower than the configured timeout; the retry lands on the fast mock.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_body("too late"))
                .set_delay(Duration::from_millis(800)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("Back online!")))
        .mount(&server)
        .await;

    let config = AiConfig {
        timeout_ms: 200,
        retry_backoff_ms: 50,
        ..ai_config(&server.uri())
    };
    let gate = MotivationGate::new(config).unwrap();

    let outcome = gate.request_motivation("Buy groceries").await;
    assert_eq!(outcome, MotivationOutcome::success("Back online!"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transient() {
    // Nothing listens on this port; both attempts fail at the network level.
    let config = AiConfig {
        api_key: Some("sk-test".to_string()),
        api_base: "http://127.0.0.1:1".to_string(),
        retry_backoff_ms: 10,
        ..AiConfig::default()
    };
    let gate = MotivationGate::new(config).unwrap();

    let outcome = gate.request_motivation("Buy groceries").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::TransientError));
}
