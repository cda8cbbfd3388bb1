//! Authorization handshake
//!
//! Finds the chat id of a new user: the user sends a one-time code to the bot,
//! and the first incoming message that contains it wins. There is no timeout;
//! the wait ends on a match or when the process is interrupted.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use rand::Rng;
use teloxide::prelude::*;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::{Error, Result};

/// One-time six digit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCode(u32);

impl AuthCode {
    pub fn generate() -> Self {
        Self(rand::thread_rng().gen_range(100_000..=999_999))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// True if `text` contains the code anywhere.
    pub fn matches(self, text: &str) -> bool {
        text.contains(&self.0.to_string())
    }
}

impl fmt::Display for AuthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands the chat id of the first matching message to a waiting receiver.
#[derive(Debug)]
pub struct CodeWatcher {
    code: AuthCode,
    slot: Mutex<Option<oneshot::Sender<i64>>>,
}

impl CodeWatcher {
    pub fn new(code: AuthCode) -> (Arc<Self>, oneshot::Receiver<i64>) {
        let (tx, rx) = oneshot::channel();
        let watcher = Arc::new(Self {
            code,
            slot: Mutex::new(Some(tx)),
        });
        (watcher, rx)
    }

    /// Check an incoming message. Returns true only for the message that resolved the handshake.
    pub fn offer(&self, chat_id: i64, text: &str) -> bool {
        if !self.code.matches(text) {
            return false;
        }

        let sender = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sender {
            Some(tx) => tx.send(chat_id).is_ok(),
            None => false,
        }
    }
}

/// Run the handshake for the bot with `token` and return the authorized chat id.
///
/// `api_url` points the bot at a different Bot API server.
pub async fn authorize(token: &str, api_url: Option<&str>) -> Result<i64> {
    let mut bot = Bot::new(token);
    if let Some(url) = api_url {
        let url = reqwest::Url::parse(url)
            .map_err(|e| Error::ConfigError(format!("invalid API URL {url}: {e}")))?;
        bot = bot.set_api_url(url);
    }

    let me = bot.get_me().await?;
    let code = AuthCode::generate();

    eprintln!(
        "Please send the following code to @{}: {}",
        me.username(),
        code
    );

    let chat_id = wait_for_code(bot, code).await?;
    info!(chat_id, "user authorized");
    Ok(chat_id)
}

/// Poll for updates until a message containing `code` arrives.
pub async fn wait_for_code(bot: Bot, code: AuthCode) -> Result<i64> {
    let (watcher, rx) = CodeWatcher::new(code);

    let handler = Update::filter_message().endpoint(move |msg: Message| {
        let watcher = Arc::clone(&watcher);
        async move {
            if let Some(text) = msg.text() {
                if watcher.offer(msg.chat.id.0, text) {
                    debug!(chat_id = msg.chat.id.0, "received authorization code");
                }
            }
            respond(())
        }
    });

    let mut dispatcher = Dispatcher::builder(bot, handler).build();
    let shutdown = dispatcher.shutdown_token();
    let polling = tokio::spawn(async move { dispatcher.dispatch().await });

    let received = rx.await;

    if let Ok(stopped) = shutdown.shutdown() {
        stopped.await;
    }
    let joined = polling.await;

    received.map_err(|_| match joined {
        Err(e) => Error::TransportError(format!(
            "update stream closed before the code was received: {e}"
        )),
        Ok(()) => {
            Error::TransportError("update stream closed before the code was received".to_string())
        }
    })
}
