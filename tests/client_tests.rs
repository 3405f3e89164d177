//! Integration tests against a mock HTTP server.

use httpmock::prelude::*;
use nulzmail_client::{Client, Error, WaitOptions};
use serde_json::json;
use std::time::{Duration, Instant};

fn test_client(server: &MockServer) -> Client {
    Client::builder()
        .api_key("secret-key")
        .base_url(server.base_url())
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn every_request_carries_the_api_key_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/aliases")
                .header("authorization", "ApiKey secret-key");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "aliases": [] }));
        })
        .await;

    let client = test_client(&server);
    let inboxes = client.list_inboxes().await.expect("list should succeed");

    assert!(inboxes.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn object_error_bodies_are_parsed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/aliases");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(json!({
                    "error": { "code": "invalid", "message": "bad request" }
                }));
        })
        .await;

    let client = test_client(&server);
    let err = client.list_inboxes().await.expect_err("expected error");

    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    let Error::Api { code, message, .. } = &err else {
        panic!("expected api error, got {err:?}");
    };
    assert_eq!(code.as_deref(), Some("invalid"));
    assert_eq!(message.as_deref(), Some("bad request"));
    assert!(err.to_string().contains("bad request"));
}

#[tokio::test]
async fn string_error_bodies_are_parsed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/aliases/a1");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({ "error": "no api key" }));
        })
        .await;

    let client = test_client(&server);
    let err = client.delete_inbox("a1").await.expect_err("expected error");

    let Error::Api { status, message, .. } = &err else {
        panic!("expected api error, got {err:?}");
    };
    assert_eq!(status.as_u16(), 401);
    assert_eq!(message.as_deref(), Some("no api key"));
}

#[tokio::test]
async fn non_json_error_bodies_keep_the_raw_snippet() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/messages/m1");
            then.status(502).body("upstream fell over");
        })
        .await;

    let client = test_client(&server);
    let err = client.get_message("m1").await.expect_err("expected error");

    let Error::Api {
        status,
        message,
        body,
        ..
    } = &err
    else {
        panic!("expected api error, got {err:?}");
    };
    assert_eq!(status.as_u16(), 502);
    assert!(message.is_none());
    assert_eq!(body, "upstream fell over");
}

#[tokio::test]
async fn create_inbox_sends_an_empty_json_object() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/aliases")
                .header("content-type", "application/json")
                .json_body(json!({}));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "a1", "address": "x7f2@nulz.lol" }));
        })
        .await;

    let client = test_client(&server);
    let inbox = client.create_inbox().await.expect("create should succeed");

    assert_eq!(inbox.id, "a1");
    assert_eq!(inbox.address, "x7f2@nulz.lol");
    mock.assert_async().await;
}

#[tokio::test]
async fn create_inbox_with_prefix_sends_the_prefix() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/aliases")
                .json_body(json!({ "prefix": "signup-test" }));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "a2", "address": "signup-test.k3@nulz.lol" }));
        })
        .await;

    let client = test_client(&server);
    let inbox = client
        .create_inbox_with_prefix("signup-test")
        .await
        .expect("create should succeed");

    assert_eq!(inbox.address, "signup-test.k3@nulz.lol");
    mock.assert_async().await;
}

#[tokio::test]
async fn list_inboxes_unwraps_the_aliases_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/aliases");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "aliases": [
                        { "id": "a1", "address": "one@nulz.lol" },
                        { "id": "a2", "address": "two@nulz.lol" }
                    ]
                }));
        })
        .await;

    let client = test_client(&server);
    let inboxes = client.list_inboxes().await.expect("list should succeed");

    assert_eq!(inboxes.len(), 2);
    assert_eq!(inboxes[1].address, "two@nulz.lol");
}

#[tokio::test]
async fn list_inboxes_treats_null_aliases_as_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/aliases");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "aliases": null }));
        })
        .await;

    let client = test_client(&server);
    let inboxes = client.list_inboxes().await.expect("list should succeed");

    assert!(inboxes.is_empty());
}

#[tokio::test]
async fn list_messages_passes_the_cursor_as_offset() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/aliases/a1/messages")
                .query_param("limit", "50")
                .query_param("offset", "50");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "messages": [{
                        "id": "m9",
                        "subject": "older",
                        "from_addr": "a@b",
                        "to_addr": "c@d",
                        "received_at": "2026-08-06T10:00:00Z"
                    }],
                    "total": 51,
                    "cursor": "100"
                }));
        })
        .await;

    let client = test_client(&server);
    let page = client
        .list_messages("a1", Some("50"))
        .await
        .expect("list should succeed");

    assert_eq!(page.total, 51);
    assert_eq!(page.cursor.as_deref(), Some("100"));
    assert_eq!(page.messages[0].id, "m9");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_message_returns_bodies() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/messages/m1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "id": "m1",
                    "subject": "Your code",
                    "from_addr": "noreply@service.example",
                    "to_addr": "x7f2@nulz.lol",
                    "body_text": "Your code is 123456",
                    "body_html": "<p>Your code is 123456</p>",
                    "received_at": "2026-08-06T10:00:00Z"
                }));
        })
        .await;

    let client = test_client(&server);
    let msg = client.get_message("m1").await.expect("fetch should succeed");

    assert_eq!(msg.subject, "Your code");
    assert_eq!(msg.body_text.as_deref(), Some("Your code is 123456"));
}

#[tokio::test]
async fn wait_returns_the_first_message_and_fetches_it() {
    let server = MockServer::start_async().await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/aliases/a1/messages");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "messages": [{
                        "id": "m1",
                        "subject": "hi",
                        "from_addr": "a@b",
                        "to_addr": "c@d",
                        "received_at": ""
                    }],
                    "total": 1
                }));
        })
        .await;
    let get_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/messages/m1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "id": "m1",
                    "subject": "hi",
                    "from_addr": "a@b",
                    "to_addr": "c@d",
                    "body_text": "hello there",
                    "body_html": null,
                    "received_at": ""
                }));
        })
        .await;

    let client = test_client(&server);
    let started = Instant::now();
    let msg = client
        .wait_for_message(
            "a1",
            WaitOptions {
                poll_interval: Duration::from_millis(50),
                timeout: Duration::from_secs(30),
            },
        )
        .await
        .expect("wait should succeed");

    assert_eq!(msg.subject, "hi");
    assert_eq!(msg.from_addr, "a@b");
    assert_eq!(msg.body_text.as_deref(), Some("hello there"));
    // Message was already there, so no polling delay comes into play.
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(list_mock.hits_async().await >= 1);
    get_mock.assert_async().await;
}

#[tokio::test]
async fn wait_falls_back_to_the_summary_when_the_fetch_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/aliases/a1/messages");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "messages": [{
                        "id": "m1",
                        "subject": "hi",
                        "from_addr": "a@b",
                        "to_addr": "c@d",
                        "received_at": "2026-08-06T10:00:00Z"
                    }],
                    "total": 1
                }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/messages/m1");
            then.status(500)
                .header("content-type", "application/json")
                .json_body(json!({ "error": "boom" }));
        })
        .await;

    let client = test_client(&server);
    let msg = client
        .wait_for_message("a1", WaitOptions::default())
        .await
        .expect("wait should fall back to the summary");

    assert_eq!(msg.id, "m1");
    assert_eq!(msg.subject, "hi");
    assert!(msg.body_text.is_none());
    assert!(msg.body_html.is_none());
}

#[tokio::test]
async fn wait_times_out_with_a_synthetic_408() {
    let server = MockServer::start_async().await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/aliases/a1/messages");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "messages": [], "total": 0 }));
        })
        .await;

    let client = test_client(&server);
    let started = Instant::now();
    let err = client
        .wait_for_message(
            "a1",
            WaitOptions {
                poll_interval: Duration::from_millis(20),
                timeout: Duration::from_millis(150),
            },
        )
        .await
        .expect_err("expected timeout");

    assert!(err.is_wait_timeout());
    assert_eq!(err.status().map(|s| s.as_u16()), Some(408));
    // Bounded by the configured deadline, give or take one poll interval.
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(list_mock.hits_async().await >= 2);
}

#[tokio::test]
async fn wait_propagates_listing_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/aliases/a1/messages");
            then.status(404)
                .header("content-type", "application/json")
                .json_body(json!({ "error": { "code": "not_found", "message": "no such alias" } }));
        })
        .await;

    let client = test_client(&server);
    let err = client
        .wait_for_message("a1", WaitOptions::default())
        .await
        .expect_err("expected error");

    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert!(!err.is_wait_timeout());
}
