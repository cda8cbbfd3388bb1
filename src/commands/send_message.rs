//! Send a message, file or directory to the authorized chat

use tracing::info;

use crate::config::{Config, Limits};
use crate::error::{Error, Result};
use crate::message::{classify, Deliverer, MessageKind, SendRequest};

/// CLI entry point
pub async fn run(config: &Config, request: SendRequest) -> Result<MessageKind> {
    // May block on stdin.
    let message = tokio::task::spawn_blocking(move || classify(request, Limits::default()))
        .await
        .map_err(|e| Error::InvalidArgument(format!("classification task failed: {e}")))??;

    info!(kind = %message.kind, detected = message.detected, "classified message");

    let kind = Deliverer::from_config(config)
        .deliver(message, config.chat_id)
        .await?;

    info!(%kind, chat_id = config.chat_id, "message sent");
    Ok(kind)
}
