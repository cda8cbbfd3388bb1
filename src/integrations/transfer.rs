//! Upload host client (transfer.sh compatible) for files too large for Telegram.

use std::path::Path;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use reqwest::{Body, Client, Url};
use tracing::info;

use crate::config::DEFAULT_UPLOAD_URL;
use crate::{Error, Result};

const CLIENT_LABEL: &str = concat!("tell/", env!("CARGO_PKG_VERSION"));

/// PUTs files to the upload host and returns their download links.
#[derive(Debug, Clone)]
pub struct TransferClient {
    http: Client,
    base_url: String,
}

impl Default for TransferClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferClient {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_UPLOAD_URL)
    }

    pub fn with_url(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// `<base>/<file name>`, with the name percent-encoded.
    fn upload_url(&self, name: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::UploadError(format!("invalid upload URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::UploadError(format!("invalid upload URL {}", self.base_url)))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }

    /// Stream the file at `path` to the host and return the link from the response body.
    pub async fn upload(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::UploadError(format!("{} has no file name", path.display())))?;
        let url = self.upload_url(&name)?;

        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| Error::file(path, e))?;
        let len = file
            .metadata()
            .await
            .map_err(|e| Error::stat(path, e))?
            .len();

        info!(file = %path.display(), bytes = len, %url, "uploading file");

        let response = self
            .http
            .put(url)
            .header(USER_AGENT, CLIENT_LABEL)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, len)
            .body(Body::from(file))
            .send()
            .await
            .map_err(|e| Error::UploadError(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::UploadError(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::UploadError(format!(
                "upload host returned {}: {}",
                status, body
            )));
        }

        let link = body.trim();
        if link.is_empty() {
            return Err(Error::UploadError(format!(
                "upload host returned an empty body for {}",
                path.display()
            )));
        }
        Ok(link.to_string())
    }
}
