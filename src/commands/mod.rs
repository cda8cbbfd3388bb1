//! Command implementations
//!
//! Each module corresponds to one mode of the `tell` binary.

pub mod authorize;
pub mod send_message;
pub mod set_token;

use crate::config::Config;
use crate::error::{Error, Result};

pub const NO_TOKEN_MESSAGE: &str = "no bot token found.\n\n\
To obtain one, create a bot by sending /newbot to @BotFather (https://t.me/botfather).\n\n\
Set your token with 'tell -t <token>'";

pub const NO_USER_MESSAGE: &str =
    "No authorized user found. Please authorize a user with 'tell -a'";

/// The config, if it has a bot token.
pub fn require_token(config: Option<Config>) -> Result<Config> {
    match config {
        Some(config) if !config.bot_token.is_empty() => Ok(config),
        _ => Err(Error::ConfigError(NO_TOKEN_MESSAGE.to_string())),
    }
}

/// The config, if it has a bot token and an authorized chat.
pub fn require_chat(config: Option<Config>) -> Result<Config> {
    let config = require_token(config)?;
    if !config.is_authorized() {
        return Err(Error::ConfigError(NO_USER_MESSAGE.to_string()));
    }
    Ok(config)
}
