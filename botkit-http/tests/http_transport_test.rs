//! Integration tests for [`botkit_http::HttpTransport`] against a mockito server.
//!
//! Request path format is `/bot<token>/<method>`; the test token is `test_bot_token_12345`.

use std::sync::Arc;
use std::time::Duration;

use botkit_core::{params, Bot, BotError, MiddlewareChain, Transport};
use botkit_http::HttpTransport;
use mockito::Matcher;
use serde_json::json;

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

fn transport_for(server: &mockito::ServerGuard) -> HttpTransport {
    HttpTransport::new(&server.url(), TEST_BOT_TOKEN, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_posts_json_params_and_returns_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", format!("/bot{}/sendMessage", TEST_BOT_TOKEN).as_str())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "chat_id": 42, "text": "hello" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true, "result": {"message_id": 7}}"#)
        .create_async()
        .await;

    let transport = transport_for(&server);
    let body = transport
        .send("sendMessage", &params(json!({ "chat_id": 42, "text": "hello" })))
        .await
        .unwrap();

    assert_eq!(body, json!({ "ok": true, "result": { "message_id": 7 } }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_network_error_with_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", format!("/bot{}/getMe", TEST_BOT_TOKEN).as_str())
        .with_status(401)
        .with_body(r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#)
        .create_async()
        .await;

    let err = transport_for(&server)
        .send("getMe", &Default::default())
        .await
        .unwrap_err();

    match err {
        BotError::Network {
            status,
            body,
            message,
        } => {
            assert_eq!(status, Some(401));
            assert!(body.unwrap().contains("Unauthorized"));
            assert!(!message.contains(TEST_BOT_TOKEN));
        }
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_is_network_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", format!("/bot{}/getMe", TEST_BOT_TOKEN).as_str())
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = transport_for(&server)
        .send("getMe", &Default::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(200));
    assert!(matches!(err, BotError::Network { body: Some(ref b), .. } if b.contains("gateway")));
}

#[tokio::test]
async fn test_connection_failure_has_no_status_and_hides_token() {
    // Nothing listens on port 9 (discard) in the test environment.
    let transport =
        HttpTransport::new("http://127.0.0.1:9", TEST_BOT_TOKEN, Duration::from_secs(2)).unwrap();

    let err = transport
        .send("getMe", &Default::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), None);
    assert!(!err.to_string().contains(TEST_BOT_TOKEN));
}

#[tokio::test]
async fn test_bot_facade_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", format!("/bot{}/getMe", TEST_BOT_TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true, "result": {"id": 123456789, "is_bot": true, "first_name": "TestBot", "username": "testbot"}}"#)
        .create_async()
        .await;

    let bot = Bot::new(MiddlewareChain::new(Arc::new(transport_for(&server))));
    let me = bot.get_me().await.unwrap();

    assert_eq!(me["username"], "testbot");
}
