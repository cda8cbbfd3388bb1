//! Configuration for the bot credential and the recipient chat
//!
//! Loads `~/.tell.json` (or `$TELL_CONFIG`), with environment overrides

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Largest image Telegram accepts through `sendPhoto`.
pub const PHOTO_SIZE_LIMIT: u64 = 10 * 1024 * 1024;
/// Largest file a bot may send.
pub const FILE_SIZE_LIMIT: u64 = 50 * 1024 * 1024;

pub const CONFIG_FILE_NAME: &str = ".tell.json";
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_UPLOAD_URL: &str = "https://transfer.sh";

/// Size thresholds used by classification and delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub photo: u64,
    pub file: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            photo: PHOTO_SIZE_LIMIT,
            file: FILE_SIZE_LIMIT,
        }
    }
}

/// Persisted settings. `chat_id == 0` means no user has been authorized yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_url: Option<String>,
}

impl Config {
    /// `$TELL_CONFIG` if set, otherwise `~/.tell.json`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("TELL_CONFIG") {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let home = dirs::home_dir()
            .ok_or_else(|| Error::ConfigError("failed to get user home directory".to_string()))?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load .env file into environment variables using dotenvy
    pub fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }

    /// Read the config file and apply environment overrides. A missing file is `Ok(None)`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        Ok(Self::load_raw(path)?.map(Self::resolve_env))
    }

    /// Config built only from `TELL_*` variables, if they provide a token.
    pub fn from_env() -> Option<Self> {
        let config = Self::default().resolve_env();
        (!config.bot_token.is_empty()).then_some(config)
    }

    /// Read the config file as stored, without environment overrides.
    pub fn load_raw<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::ConfigError(format!(
                    "failed to open config file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::ConfigError(format!(
                "failed to decode config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Some(config))
    }

    /// Write the config as pretty JSON, readable only by the owner.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| {
            Error::ConfigError(format!("failed to save config {}: {}", path.display(), e))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Apply `${VAR}` references and `TELL_*` overrides.
    pub fn resolve_env(mut self) -> Self {
        self.bot_token = Self::resolve_env_string(Some(self.bot_token), "TELL_BOT_TOKEN");
        self.chat_id = Self::resolve_env_i64(self.chat_id, "TELL_CHAT_ID");
        self.api_url = Self::resolve_env_optional(self.api_url, "TELL_API_URL");
        self.upload_url = Self::resolve_env_optional(self.upload_url, "TELL_UPLOAD_URL");
        self
    }

    /// Bot API base URL.
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Upload host base URL.
    pub fn upload_url(&self) -> &str {
        self.upload_url.as_deref().unwrap_or(DEFAULT_UPLOAD_URL)
    }

    pub fn is_authorized(&self) -> bool {
        self.chat_id != 0
    }

    /// Resolve a value: prefer env var if config value looks like ${VAR}
    fn resolve_env_string(value: Option<String>, env_key: &str) -> String {
        if let Some(ref v) = value {
            if let Some(var_name) = v.strip_prefix("${").and_then(|v| v.strip_suffix('}')) {
                if let Ok(env_val) = std::env::var(var_name) {
                    return env_val;
                }
            }
        }
        if let Ok(env_val) = std::env::var(env_key) {
            if !env_val.is_empty() {
                return env_val;
            }
        }
        value.unwrap_or_default()
    }

    fn resolve_env_optional(value: Option<String>, env_key: &str) -> Option<String> {
        let resolved = Self::resolve_env_string(value, env_key);
        (!resolved.is_empty()).then_some(resolved)
    }

    fn resolve_env_i64(value: i64, env_key: &str) -> i64 {
        std::env::var(env_key)
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(value)
    }
}
