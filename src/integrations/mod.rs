//! External integrations module.
//!
//! Provides clients for:
//! - Telegram Bot API (sending messages and files)
//! - transfer.sh compatible upload hosts

pub mod telegram;
pub mod transfer;

pub use telegram::TelegramApi;
pub use transfer::TransferClient;
