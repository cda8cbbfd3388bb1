//! Message classification and delivery
//!
//! - `kind`: the closed set of message kinds and their Bot API profiles
//! - `classify`: turns command line input into a [`PendingMessage`]
//! - `deliver`: archives, uploads and submits a [`PendingMessage`]

pub mod classify;
pub mod deliver;
pub mod kind;

use std::path::PathBuf;

pub use classify::{classify, classify_with_input, detect_kind, SendRequest};
pub use deliver::Deliverer;
pub use kind::{kind_for_extension, kind_from_name, profile_for, KindProfile, MessageKind};

use crate::config::Limits;

/// A message on its way to Telegram.
///
/// Built once by the classifier and moved through the delivery stages, each of
/// which may rewrite `kind` and `file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    pub kind: MessageKind,
    /// True if `kind` was detected rather than chosen with `--file-type`.
    pub detected: bool,
    pub text: String,
    pub file: Option<PathBuf>,
    /// Never fall back to the upload host, even if the file is too large.
    pub no_upload: bool,
}

impl PendingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Text,
            detected: true,
            text: text.into(),
            file: None,
            no_upload: false,
        }
    }

    /// Replace a directory with its archive of `archive_size` bytes.
    pub fn into_archived(mut self, archive: PathBuf, archive_size: u64, limits: Limits) -> Self {
        self.file = Some(archive);
        self.kind = if archive_size <= limits.file || self.no_upload {
            MessageKind::Document
        } else {
            MessageKind::FileUpload
        };
        self
    }

    /// Replace an uploaded file with the link to it.
    pub fn into_uploaded(mut self, url: &str) -> Self {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(url);
        self.file = None;
        self.kind = MessageKind::Text;
        self
    }
}
