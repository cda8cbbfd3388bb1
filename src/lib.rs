//! Send messages to Telegram from the command line
//!
//! This library provides tools to:
//! - Classify text, files and directories into Telegram message kinds
//! - Zip directories and fall back to an upload host for oversized files
//! - Submit messages through the Bot API
//! - Authorize a chat with a one-time code handshake

pub mod archive;
pub mod config;
pub mod error;
pub mod handshake;
pub mod integrations;
pub mod message;

// Re-export common types
pub use config::{Config, Limits};
pub use error::{Error, Result};
pub use integrations::{TelegramApi, TransferClient};
pub use message::{classify, Deliverer, MessageKind, PendingMessage, SendRequest};

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
