//! Message kinds and the static per-kind profile table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Transport-specific category of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Animation,
    Audio,
    Document,
    Photo,
    Sticker,
    Video,
    VideoNote,
    Voice,
    /// Too large for Telegram; sent as a link to the upload host.
    FileUpload,
    /// Zipped before sending.
    Directory,
}

/// How a kind is submitted to the Bot API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindProfile {
    /// Bot API method, `None` for staged kinds that are rewritten before submission.
    pub method: Option<&'static str>,
    pub extensions: &'static [&'static str],
    /// Request field carrying the text or caption.
    pub text_field: Option<&'static str>,
    /// Request field carrying the file.
    pub file_field: Option<&'static str>,
}

impl MessageKind {
    pub const ALL: [MessageKind; 11] = [
        MessageKind::Text,
        MessageKind::Animation,
        MessageKind::Audio,
        MessageKind::Document,
        MessageKind::Photo,
        MessageKind::Sticker,
        MessageKind::Video,
        MessageKind::VideoNote,
        MessageKind::Voice,
        MessageKind::FileUpload,
        MessageKind::Directory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Animation => "animation",
            MessageKind::Audio => "audio",
            MessageKind::Document => "document",
            MessageKind::Photo => "photo",
            MessageKind::Sticker => "sticker",
            MessageKind::Video => "video",
            MessageKind::VideoNote => "video_note",
            MessageKind::Voice => "voice",
            MessageKind::FileUpload => "file_upload",
            MessageKind::Directory => "directory",
        }
    }

    /// Staged kinds never reach the Bot API directly.
    pub fn is_staged(self) -> bool {
        matches!(self, MessageKind::FileUpload | MessageKind::Directory)
    }

    pub fn profile(self) -> &'static KindProfile {
        profile_for(self)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        kind_from_name(s)
    }
}

static PROFILES: LazyLock<HashMap<MessageKind, KindProfile>> = LazyLock::new(|| {
    fn profile(
        method: Option<&'static str>,
        extensions: &'static [&'static str],
        text_field: Option<&'static str>,
        file_field: Option<&'static str>,
    ) -> KindProfile {
        KindProfile {
            method,
            extensions,
            text_field,
            file_field,
        }
    }

    HashMap::from([
        (
            MessageKind::Text,
            profile(Some("sendMessage"), &[], Some("text"), None),
        ),
        (
            MessageKind::Animation,
            profile(Some("sendAnimation"), &[".gif"], Some("caption"), Some("animation")),
        ),
        (
            MessageKind::Audio,
            profile(Some("sendAudio"), &[".mp3", ".m4a"], Some("caption"), Some("audio")),
        ),
        (
            MessageKind::Document,
            profile(Some("sendDocument"), &[], Some("caption"), Some("document")),
        ),
        (
            MessageKind::Photo,
            profile(
                Some("sendPhoto"),
                &[".jpg", ".jpeg", ".png"],
                Some("caption"),
                Some("photo"),
            ),
        ),
        (
            MessageKind::Sticker,
            profile(Some("sendSticker"), &[".webp"], None, Some("sticker")),
        ),
        (
            MessageKind::Video,
            profile(Some("sendVideo"), &[".mp4"], Some("caption"), Some("video")),
        ),
        (
            MessageKind::VideoNote,
            profile(Some("sendVideoNote"), &[], None, Some("video_note")),
        ),
        (
            MessageKind::Voice,
            profile(Some("sendVoice"), &[".ogg", ".oga"], None, Some("voice")),
        ),
        // The upload link ends up in a text message.
        (
            MessageKind::FileUpload,
            profile(None, &[], Some("text"), Some("document")),
        ),
        // The archive is sent as a document unless it needs the upload host.
        (
            MessageKind::Directory,
            profile(None, &[], Some("caption"), Some("document")),
        ),
    ])
});

static EXTENSIONS: LazyLock<HashMap<&'static str, MessageKind>> = LazyLock::new(|| {
    let mut extensions = HashMap::new();
    for kind in MessageKind::ALL {
        for ext in profile_for(kind).extensions {
            let previous = extensions.insert(*ext, kind);
            assert!(
                previous.is_none(),
                "extension {ext} is claimed by both {} and {kind}",
                previous.map(MessageKind::as_str).unwrap_or_default()
            );
        }
    }
    extensions
});

/// Profile of `kind`. Every kind has one.
pub fn profile_for(kind: MessageKind) -> &'static KindProfile {
    &PROFILES[&kind]
}

/// Kind registered for a file extension (with the leading dot), ignoring case.
pub fn kind_for_extension(ext: &str) -> Option<MessageKind> {
    EXTENSIONS.get(ext.to_ascii_lowercase().as_str()).copied()
}

/// Parse a user-supplied kind name.
pub fn kind_from_name(name: &str) -> Result<MessageKind> {
    match name {
        "text" => Ok(MessageKind::Text),
        "animation" => Ok(MessageKind::Animation),
        "audio" => Ok(MessageKind::Audio),
        "document" => Ok(MessageKind::Document),
        "photo" => Ok(MessageKind::Photo),
        "sticker" => Ok(MessageKind::Sticker),
        "video" => Ok(MessageKind::Video),
        "video_note" => Ok(MessageKind::VideoNote),
        "voice" => Ok(MessageKind::Voice),
        "upload" => Ok(MessageKind::FileUpload),
        "folder" => Ok(MessageKind::Directory),
        other => Err(Error::InvalidType(other.to_string())),
    }
}
