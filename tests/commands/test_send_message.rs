//! Tests for the send command

use httpmock::prelude::*;
use serde_json::json;
use tempfile::tempdir;

use tell::commands::{require_chat, send_message};
use tell::{Config, Error, MessageKind, SendRequest};

#[tokio::test]
async fn test_send_photo_with_caption() {
    let server = MockServer::start_async().await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("sunset.png");
    std::fs::write(&path, b"png").unwrap();

    let send = server.mock(|when, then| {
        when.method(POST).path("/botT/sendPhoto");
        then.status(200).json_body(json!({ "ok": true, "result": {} }));
    });

    let config = Config {
        bot_token: "T".to_string(),
        chat_id: 3,
        api_url: Some(server.base_url()),
        ..Default::default()
    };
    let request = SendRequest {
        text: "view from the office".to_string(),
        file: Some(path),
        ..Default::default()
    };

    let kind = send_message::run(&config, request).await.unwrap();
    assert_eq!(kind, MessageKind::Photo);
    send.assert_calls(1);
}

#[tokio::test]
async fn test_send_rejects_caption_for_sticker() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wave.webp");
    std::fs::write(&path, b"webp").unwrap();

    let config = Config {
        bot_token: "T".to_string(),
        chat_id: 3,
        api_url: Some("http://127.0.0.1:9".to_string()),
        ..Default::default()
    };
    let request = SendRequest {
        text: "hi".to_string(),
        file: Some(path),
        ..Default::default()
    };

    let err = send_message::run(&config, request).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedText(MessageKind::Sticker)));
}

#[test]
fn test_send_requires_authorized_chat() {
    let config = Config {
        bot_token: "T".to_string(),
        ..Default::default()
    };
    assert!(require_chat(Some(config)).is_err());
}
