//! Error types for classification, delivery and authorization

use std::path::Path;

use thiserror::Error;

use crate::message::MessageKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("file {0} does not exist")]
    NotFound(String),

    #[error("error when statting {0}")]
    StatError(String),

    #[error("invalid file type: {0}")]
    InvalidType(String),

    #[error("{0} and --no-upload was specified")]
    UploadSuppressed(String),

    #[error("sending text is not supported with message type {0}")]
    UnsupportedText(MessageKind),

    #[error("sending files is not supported with message type {0}")]
    UnsupportedFile(MessageKind),

    #[error("failed to create archive: {0}")]
    ArchiveError(String),

    #[error("failed to upload file: {0}")]
    UploadError(String),

    #[error("Telegram API error: {0}")]
    TransportError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to open {0}")]
    FileError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stat failure for `path`, keeping the cause in the message.
    pub fn stat(path: &Path, err: std::io::Error) -> Self {
        Error::StatError(format!("{}: {}", path.display(), err))
    }

    /// Archive failure for `path`.
    pub fn archive(path: &Path, err: impl std::fmt::Display) -> Self {
        Error::ArchiveError(format!("{}: {}", path.display(), err))
    }

    pub fn file(path: &Path, err: std::io::Error) -> Self {
        Error::FileError(format!("{}: {}", path.display(), err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

impl From<teloxide::RequestError> for Error {
    fn from(err: teloxide::RequestError) -> Self {
        Error::TransportError(err.to_string())
    }
}
