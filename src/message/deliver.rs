//! Delivery of a classified message.
//!
//! Directories are zipped, files over the size limit go to the upload host, and
//! whatever is left is submitted with the Bot API method of its kind.

use tracing::{debug, info};

use super::kind::{profile_for, MessageKind};
use super::PendingMessage;
use crate::archive::{create_archive, Archive};
use crate::config::{Config, Limits};
use crate::integrations::{TelegramApi, TransferClient};
use crate::{Error, Result};

/// Sends [`PendingMessage`]s to one bot.
#[derive(Debug, Clone)]
pub struct Deliverer {
    telegram: TelegramApi,
    uploader: TransferClient,
    limits: Limits,
}

impl Deliverer {
    pub fn new(telegram: TelegramApi, uploader: TransferClient, limits: Limits) -> Self {
        Self {
            telegram,
            uploader,
            limits,
        }
    }

    /// Deliverer for the bot and hosts in `config`, with the default limits.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TelegramApi::with_url(config.api_url(), &config.bot_token),
            TransferClient::with_url(config.upload_url()),
            Limits::default(),
        )
    }

    /// Send `message` to `chat_id`, returning the kind that was finally submitted.
    pub async fn deliver(&self, message: PendingMessage, chat_id: i64) -> Result<MessageKind> {
        // Held until return so the archive is removed on every path.
        let (mut message, _archive) = if message.kind == MessageKind::Directory {
            let (archived, archive) = self.archive_directory(message).await?;
            (archived, Some(archive))
        } else {
            (message, None)
        };

        if message.kind == MessageKind::FileUpload {
            message = self.upload(message).await?;
        }

        self.submit(&message, chat_id).await?;
        Ok(message.kind)
    }

    async fn archive_directory(&self, message: PendingMessage) -> Result<(PendingMessage, Archive)> {
        let dir = message.file.clone().ok_or_else(|| {
            Error::InvalidArgument("directory message without a path".to_string())
        })?;

        let archive = tokio::task::spawn_blocking(move || create_archive(&dir))
            .await
            .map_err(|e| Error::ArchiveError(format!("archive task failed: {e}")))??;
        let size = archive.size()?;

        let message = message.into_archived(archive.path().to_path_buf(), size, self.limits);
        info!(
            archive = %archive.path().display(),
            bytes = size,
            kind = %message.kind,
            "archived directory"
        );
        Ok((message, archive))
    }

    async fn upload(&self, message: PendingMessage) -> Result<PendingMessage> {
        let path = message
            .file
            .as_deref()
            .ok_or_else(|| Error::InvalidArgument("upload message without a file".to_string()))?;

        let url = self.uploader.upload(path).await?;
        info!(%url, "file uploaded");
        Ok(message.into_uploaded(&url))
    }

    async fn submit(&self, message: &PendingMessage, chat_id: i64) -> Result<()> {
        let kind = message.kind;
        let profile = profile_for(kind);
        let method = profile.method.ok_or_else(|| {
            Error::TransportError(format!("message type {kind} cannot be sent directly"))
        })?;

        let text = profile
            .text_field
            .map(|field| (field, message.text.as_str()));
        let file = match (profile.file_field, message.file.as_deref()) {
            (Some(field), Some(path)) => Some((field, path)),
            _ => None,
        };

        debug!(%kind, method, has_file = file.is_some(), "submitting message");
        self.telegram.send(method, chat_id, text, file).await
    }
}
