//! Orchestration tests: limiter, session slot, gate, and task flows

use std::sync::Arc;

use tokio_stream::StreamExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskmate_rs::core::session::{AI_CALL_TIMES_KEY, load_call_window};
use taskmate_rs::{
    Config, FailureKind, MemorySessionStore, MemoryTaskStore, MotivationService, SessionStore,
    StaticIdentity, TaskService,
};

use crate::common::{ai_config, chat_body};

fn config_for(server: &MockServer, max_calls: u32) -> Config {
    let mut config = Config::default();
    config.ai = ai_config(&server.uri());
    config.rate_limit.max_calls = max_calls;
    config
}

#[tokio::test]
async fn test_requests_count_against_window_until_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("Go!")))
        .expect(2)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySessionStore::new());
    let service = MotivationService::new(&config_for(&server, 2), session.clone()).unwrap();

    assert!(service.request_for_task("Buy groceries").await.is_success());
    assert!(service.request_for_task("Walk the dog").await.is_success());

    // Third request inside the window never reaches the network.
    let outcome = service.request_for_task("Write tests").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::RateLimited));

    assert_eq!(load_call_window(session.as_ref()).len(), 2);
}

#[tokio::test]
async fn test_prefilled_window_blocks_without_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySessionStore::new());
    let now = taskmate_rs::utils::current_timestamp_millis();
    session.set(
        AI_CALL_TIMES_KEY,
        serde_json::to_string(&vec![now - 4, now - 3, now - 2, now - 1, now]).unwrap(),
    );

    let service = MotivationService::new(&config_for(&server, 5), session).unwrap();
    let outcome = service.request_for_task("Buy groceries").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::RateLimited));
}

#[tokio::test]
async fn test_failed_outcome_still_consumes_the_slot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySessionStore::new());
    let service = MotivationService::new(&config_for(&server, 5), session.clone()).unwrap();

    let outcome = service.request_for_task("Buy groceries").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::QuotaExceeded));
    assert_eq!(load_call_window(session.as_ref()).len(), 1);
}

#[tokio::test]
async fn test_task_flow_with_subscription() {
    let store = Arc::new(MemoryTaskStore::new());
    let identity = Arc::new(StaticIdentity::signed_in("user_xyz"));
    let tasks = TaskService::new(store, identity);

    let mut feed = tasks.subscribe().await.unwrap();
    assert!(feed.next().await.unwrap().is_empty());

    let id = tasks.add_task("Buy groceries").await.unwrap();
    assert_eq!(feed.next().await.unwrap().len(), 1);

    tasks.toggle_complete(&id).await.unwrap();
    let snapshot = feed.next().await.unwrap();
    assert!(snapshot[0].completed);

    tasks.rename_task(&id, "Buy milk").await.unwrap();
    let snapshot = feed.next().await.unwrap();
    assert_eq!(snapshot[0].title, "Buy milk");

    tasks.delete_task(&id).await.unwrap();
    assert!(feed.next().await.unwrap().is_empty());

    let counts = tasks.counts().await.unwrap();
    assert_eq!(counts.total, 0);
}
