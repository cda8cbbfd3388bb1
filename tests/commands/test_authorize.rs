//! Tests for the authorize and set-token commands

use tempfile::tempdir;

use tell::commands::{authorize, require_token, set_token};
use tell::handshake::{AuthCode, CodeWatcher};
use tell::Config;

#[test]
fn test_token_then_chat_id_are_stored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tell.json");

    set_token::run(&path, "123:abc").unwrap();
    let config = require_token(Config::load_raw(&path).unwrap()).unwrap();
    assert!(!config.is_authorized());

    authorize::save_chat_id(&path, 4242).unwrap();
    let config = Config::load_raw(&path).unwrap().unwrap();
    assert_eq!(config.bot_token, "123:abc");
    assert_eq!(config.chat_id, 4242);
}

#[tokio::test]
async fn test_handshake_accepts_only_first_match() {
    let code = AuthCode::generate();
    let (watcher, rx) = CodeWatcher::new(code);

    assert!(!watcher.offer(1, "hello bot"));
    assert!(watcher.offer(2, &format!("/start {code}")));
    assert!(!watcher.offer(3, &code.to_string()));

    assert_eq!(rx.await.unwrap(), 2);
}
