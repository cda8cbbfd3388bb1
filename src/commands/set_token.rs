//! Save a bot token

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};

/// Store `token` in the config at `path`, keeping the other stored settings.
pub fn run(path: &Path, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::InvalidArgument("bot token is empty".to_string()));
    }

    let mut config = Config::load_raw(path)?.unwrap_or_default();
    config.bot_token = token.to_string();
    config.save(path)?;
    info!(path = %path.display(), "bot token saved");

    eprintln!(
        "Token has been set!\n\nNow, authorize your Telegram account to receive notifications with 'tell -a'"
    );
    Ok(())
}
