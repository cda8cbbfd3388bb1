//! Decide how user input is sent.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::kind::{kind_for_extension, kind_from_name, profile_for, MessageKind};
use super::PendingMessage;
use crate::config::Limits;
use crate::error::{Error, Result};

/// Raw send request as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SendRequest {
    pub text: String,
    pub file: Option<PathBuf>,
    /// Value of `--file-type`, if any.
    pub file_type: Option<String>,
    pub no_upload: bool,
}

/// Classify `request`, reading the message from stdin if there is neither text nor a file.
pub fn classify(request: SendRequest, limits: Limits) -> Result<PendingMessage> {
    classify_with_input(request, limits, io::stdin().lock())
}

/// Like [`classify`], with an explicit input stream for empty text messages.
pub fn classify_with_input<R: Read>(
    request: SendRequest,
    limits: Limits,
    mut input: R,
) -> Result<PendingMessage> {
    let SendRequest {
        mut text,
        file,
        file_type,
        no_upload,
    } = request;

    let Some(path) = file else {
        if file_type.is_some() {
            return Err(Error::InvalidArgument(
                "file type is present, but no file was specified".to_string(),
            ));
        }
        if no_upload {
            return Err(Error::InvalidArgument(
                "cannot use --no-upload without a file".to_string(),
            ));
        }
        if text.is_empty() {
            input
                .read_to_string(&mut text)
                .map_err(|e| Error::InvalidArgument(format!("failed to read from stdin: {}", e)))?;
        }
        return Ok(PendingMessage::text(text));
    };

    let detected = detect_kind(&path, limits)?;
    debug!(path = %path.display(), %detected, "detected message kind");

    let (kind, auto) = match file_type.as_deref() {
        None => {
            if detected == MessageKind::FileUpload && no_upload {
                return Err(Error::UploadSuppressed(format!(
                    "{} is too big to send via Telegram",
                    path.display()
                )));
            }
            (detected, true)
        }
        Some(name) => {
            let explicit = kind_from_name(name)?;
            if explicit == MessageKind::FileUpload && no_upload {
                return Err(Error::UploadSuppressed(
                    "file type 'upload' was requested".to_string(),
                ));
            }
            if detected == MessageKind::FileUpload && no_upload {
                return Err(Error::UploadSuppressed(format!(
                    "{} is too big to send via Telegram",
                    path.display()
                )));
            }
            // Size and directories can't be overridden by a file type.
            match detected {
                MessageKind::FileUpload | MessageKind::Directory => (detected, false),
                _ => (explicit, false),
            }
        }
    };

    let profile = profile_for(kind);
    if profile.text_field.is_none() && !text.is_empty() {
        return Err(Error::UnsupportedText(kind));
    }
    if profile.file_field.is_none() {
        return Err(Error::UnsupportedFile(kind));
    }

    Ok(PendingMessage {
        kind,
        detected: auto,
        text,
        file: Some(path),
        no_upload,
    })
}

/// Detect the kind of the file or directory at `path` from its type, extension and size.
pub fn detect_kind(path: &Path, limits: Limits) -> Result<MessageKind> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NotFound(path.display().to_string()))
        }
        Err(e) => return Err(Error::stat(path, e)),
    };

    if metadata.is_dir() {
        return Ok(MessageKind::Directory);
    }

    let mut kind = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| kind_for_extension(&format!(".{ext}")))
        .unwrap_or(MessageKind::Document);

    let size = metadata.len();
    if kind == MessageKind::Photo && size > limits.photo {
        kind = MessageKind::Document;
    }
    if size > limits.file {
        kind = MessageKind::FileUpload;
    }

    Ok(kind)
}
