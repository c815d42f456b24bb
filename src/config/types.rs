use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dashboard::Metric;

use super::defaults::{
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_RESPONSE_BYTES,
    DEFAULT_READ_TIMEOUT_SECS, DEFAULT_WRITE_TIMEOUT_SECS, default_base_url,
    default_connect_timeout_secs, default_max_response_bytes, default_metric,
    default_read_timeout_secs, default_true, default_write_timeout_secs, or_default,
};

/// Settings read from `config.toml`.
///
/// Config keys (TOML): `gateway`, `history`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub history: HistorySettings,
}

impl AppConfig {
    pub(crate) fn normalized(self) -> Self {
        Self {
            gateway: self.gateway.normalized(),
            history: self.history,
        }
    }
}

/// Where the scoring service lives and how long to wait for it.
///
/// Config keys: `base_url`, `connect_timeout_secs`, `read_timeout_secs`,
/// `write_timeout_secs`, `max_response_bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
    /// Upper bound for any single response body.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            write_timeout_secs: DEFAULT_WRITE_TIMEOUT_SECS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl GatewaySettings {
    /// Settings pointing at `base_url` with default limits.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
        .normalized()
    }

    pub(crate) fn normalized(self) -> Self {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            base_url,
            connect_timeout_secs: or_default(self.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout_secs: or_default(self.read_timeout_secs, DEFAULT_READ_TIMEOUT_SECS),
            write_timeout_secs: or_default(self.write_timeout_secs, DEFAULT_WRITE_TIMEOUT_SECS),
            max_response_bytes: or_default(self.max_response_bytes, DEFAULT_MAX_RESPONSE_BYTES),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

/// How the performance history is presented.
///
/// Config keys: `sort_chronologically`, `default_metric`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Sort fetched runs by timestamp, oldest first.
    #[serde(default = "default_true")]
    pub sort_chronologically: bool,
    /// Metric plotted when the dashboard opens.
    #[serde(default = "default_metric")]
    pub default_metric: Metric,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            sort_chronologically: true,
            default_metric: default_metric(),
        }
    }
}

/// Errors that may occur while loading the app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No usable config directory found.
    #[error("No suitable config directory found: {0}")]
    AppDir(#[from] crate::app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
}
