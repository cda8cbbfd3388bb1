//! Telegram Bot API client for sending messages.
//!
//! Every method is called with a multipart form, so text-only and file
//! messages share one code path.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde::Deserialize;
use tracing::debug;

use crate::config::DEFAULT_API_URL;
use crate::{Error, Result};

/// Bot API client bound to one bot token.
#[derive(Debug, Clone)]
pub struct TelegramApi {
    http: Client,
    base_url: String,
    token: String,
}

/// Response envelope shared by all Bot API methods.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
}

impl TelegramApi {
    pub fn new(token: &str) -> Self {
        Self::with_url(DEFAULT_API_URL, token)
    }

    /// Create client with custom API URL.
    pub fn with_url(base_url: &str, token: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Call `method` for `chat_id` with an optional text field and an optional file field.
    pub async fn send(
        &self,
        method: &str,
        chat_id: i64,
        text: Option<(&str, &str)>,
        file: Option<(&str, &Path)>,
    ) -> Result<()> {
        let mut form = Form::new().text("chat_id", chat_id.to_string());

        if let Some((field, value)) = text {
            form = form.text(field.to_string(), value.to_string());
        }

        if let Some((field, path)) = file {
            let handle = tokio::fs::File::open(path)
                .await
                .map_err(|e| Error::file(path, e))?;
            let len = handle
                .metadata()
                .await
                .map_err(|e| Error::stat(path, e))?
                .len();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| field.to_string());

            let part = Part::stream_with_length(Body::from(handle), len).file_name(name);
            form = form.part(field.to_string(), part);
        }

        debug!(method, chat_id, "calling Bot API");

        let response = self
            .http
            .post(self.method_url(method))
            .multipart(form)
            .send()
            .await
            // The URL carries the bot token.
            .map_err(|e| Error::TransportError(format!("{method} request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::TransportError(format!("failed to read {method} response: {}", e.without_url()))
        })?;

        match serde_json::from_str::<ApiResponse>(&body) {
            Ok(api) if api.ok => Ok(()),
            Ok(api) => Err(Error::TransportError(format!(
                "{method} failed ({}): {}",
                api.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                api.description.unwrap_or_else(|| status.to_string())
            ))),
            Err(_) => Err(Error::TransportError(format!(
                "{method} failed: {} - {}",
                status, body
            ))),
        }
    }
}
