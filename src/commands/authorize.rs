//! Authorize a Telegram user to receive messages
//!
//! Runs the code handshake and stores the resulting chat id.

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::handshake;

pub async fn run(path: &Path, config: &Config) -> Result<i64> {
    let chat_id = handshake::authorize(&config.bot_token, config.api_url.as_deref()).await?;
    save_chat_id(path, chat_id)?;

    eprintln!("\n✓ Authorized chat {chat_id}. You can now send messages with 'tell <message>'");
    Ok(chat_id)
}

/// Store `chat_id` in the config at `path`, keeping everything else as stored.
pub fn save_chat_id(path: &Path, chat_id: i64) -> Result<()> {
    let mut stored = Config::load_raw(path)?.unwrap_or_default();
    stored.chat_id = chat_id;
    stored.save(path)
}
