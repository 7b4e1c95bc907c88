//! End-to-end poll cycle tests against mocked homework and Telegram APIs.
//!
//! Each test stands up a `wiremock` server per upstream, points the poller at
//! both, and drives single cycles through `poll_once`.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sentinel_common::error::AppError;
use sentinel_notifier::TelegramNotifier;
use sentinel_poller::client::HomeworkClient;
use sentinel_poller::poller::{CycleOutcome, StatusPoller};

const TIMEOUT: Duration = Duration::from_secs(5);

fn make_poller(api: &MockServer, telegram: &MockServer, from_date: i64) -> StatusPoller {
    let client = HomeworkClient::new(
        format!("{}/api/user_api/homework_statuses/", api.uri()),
        "test-token".to_string(),
        TIMEOUT,
    )
    .unwrap();
    let notifier =
        TelegramNotifier::with_base_url(&telegram.uri(), "bot-token", "12345", TIMEOUT).unwrap();
    StatusPoller::new(client, notifier, Duration::from_secs(600), from_date)
}

async fn mount_api_response(api: &MockServer, from_date: i64, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .and(header("Authorization", "OAuth test-token"))
        .and(query_param("from_date", from_date.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(api)
        .await;
}

#[tokio::test]
async fn test_status_change_is_reported_and_cursor_advances() {
    let api = MockServer::start().await;
    let telegram = MockServer::start().await;

    mount_api_response(
        &api,
        0,
        json!({
            "homeworks": [{ "homework_name": "hw1", "status": "approved" }],
            "current_date": 1000
        }),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .and(body_json(json!({
            "chat_id": "12345",
            "text": "Изменился статус проверки работы \"hw1\". \
                     Работа проверена: ревьюеру всё понравилось. Ура!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&telegram)
        .await;

    let mut poller = make_poller(&api, &telegram, 0);
    let outcome = poller.poll_once().await.unwrap();

    assert!(matches!(outcome, CycleOutcome::StatusChange(_)));
    assert_eq!(poller.from_date(), 1000);
}

#[tokio::test]
async fn test_empty_homeworks_takes_no_change_path() {
    let api = MockServer::start().await;
    let telegram = MockServer::start().await;

    mount_api_response(&api, 50, json!({ "homeworks": [], "current_date": 2000 })).await;

    // No notification may be sent on the no-change path.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&telegram)
        .await;

    let mut poller = make_poller(&api, &telegram, 50);
    let outcome = poller.poll_once().await.unwrap();

    assert_eq!(outcome, CycleOutcome::NoChange);
    assert_eq!(poller.from_date(), 50, "cursor must not advance");
}

#[tokio::test]
async fn test_api_503_reports_error_summary_and_keeps_cursor() {
    let api = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&api)
        .await;

    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&telegram)
        .await;

    let mut poller = make_poller(&api, &telegram, 77);
    let error = poller.poll_once().await.unwrap_err();
    assert!(matches!(error, AppError::ApiStatus { status: 503, .. }));

    poller.report_failure(&error).await;
    assert_eq!(poller.from_date(), 77, "cursor must not advance");

    let requests = telegram.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let text = body["text"].as_str().unwrap();
    assert!(text.starts_with("Сбой в работе программы:"));
    assert!(text.contains("503"));
}

#[tokio::test]
async fn test_unknown_status_fails_cycle_without_advancing_cursor() {
    let api = MockServer::start().await;
    let telegram = MockServer::start().await;

    mount_api_response(
        &api,
        0,
        json!({
            "homeworks": [{ "homework_name": "hw1", "status": "burned" }],
            "current_date": 9000
        }),
    )
    .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&telegram)
        .await;

    let mut poller = make_poller(&api, &telegram, 0);
    let error = poller.poll_once().await.unwrap_err();

    assert!(matches!(error, AppError::UnknownStatus(_)));
    assert_eq!(poller.from_date(), 0, "cursor must not advance");
}

#[tokio::test]
async fn test_missing_homeworks_is_shape_error() {
    let api = MockServer::start().await;
    let telegram = MockServer::start().await;

    mount_api_response(&api, 0, json!({ "current_date": 1000 })).await;

    let mut poller = make_poller(&api, &telegram, 0);
    let error = poller.poll_once().await.unwrap_err();

    assert!(matches!(error, AppError::ResponseFieldMissing("homeworks")));
}

#[tokio::test]
async fn test_non_json_body_is_malformed_response() {
    let api = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&api)
        .await;

    let mut poller = make_poller(&api, &telegram, 0);
    let error = poller.poll_once().await.unwrap_err();

    assert!(matches!(error, AppError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_delivery_failure_does_not_fail_the_cycle() {
    let api = MockServer::start().await;
    let telegram = MockServer::start().await;

    mount_api_response(
        &api,
        0,
        json!({
            "homeworks": [{ "homework_name": "hw1", "status": "rejected" }],
            "current_date": 1234
        }),
    )
    .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&telegram)
        .await;

    let mut poller = make_poller(&api, &telegram, 0);
    let outcome = poller.poll_once().await.unwrap();

    // Best-effort delivery: the cycle still completes and the cursor advances.
    assert!(matches!(outcome, CycleOutcome::StatusChange(_)));
    assert_eq!(poller.from_date(), 1234);
}

#[tokio::test]
async fn test_only_first_record_is_reported() {
    let api = MockServer::start().await;
    let telegram = MockServer::start().await;

    mount_api_response(
        &api,
        0,
        json!({
            "homeworks": [
                { "homework_name": "newest", "status": "reviewing" },
                { "homework_name": "older", "status": "approved" }
            ],
            "current_date": 4321
        }),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&telegram)
        .await;

    let mut poller = make_poller(&api, &telegram, 0);
    let outcome = poller.poll_once().await.unwrap();

    match outcome {
        CycleOutcome::StatusChange(message) => {
            assert!(message.contains("\"newest\""));
            assert!(!message.contains("older"));
        }
        other => panic!("expected StatusChange, got {other:?}"),
    }
    assert_eq!(poller.from_date(), 4321);
}
