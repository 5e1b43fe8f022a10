//! Application configuration

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::notify::{ToastConfig, ToastPosition};
use crate::DEFAULT_ENDPOINT;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot find home directory")]
    NoHome,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid endpoint '{url}': {source}")]
    Endpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration, read from `~/.report-submit/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Report endpoint; the script URL when unset
    pub endpoint: Option<String>,
    /// Whole-request timeout in seconds; none by default
    pub timeout_secs: Option<u64>,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_level: Option<String>,
    /// Output format name (table, json, yaml)
    pub default_format: Option<String>,
    /// Toast settings
    pub toast: ToastSettings,
}

/// `[toast]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastSettings {
    pub position: Option<ToastPosition>,
    pub duration_ms: Option<u64>,
}

impl AppConfig {
    /// Load the config for `profile`; a missing file yields defaults
    pub fn load(profile: Option<&str>) -> Result<Self, ConfigError> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url()?;
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".into()));
        }
        Ok(())
    }

    /// Configured endpoint, falling back to [`DEFAULT_ENDPOINT`]
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let raw = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let url = Url::parse(raw).map_err(|source| ConfigError::Endpoint {
            url: raw.to_string(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Invalid(format!(
                "endpoint scheme must be http or https, got '{}'",
                other
            ))),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Toast settings merged over the defaults
    pub fn toast_config(&self) -> ToastConfig {
        let defaults = ToastConfig::default();
        ToastConfig {
            position: self.toast.position.unwrap_or(defaults.position),
            duration: self
                .toast
                .duration_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.duration),
        }
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".report-submit").join(filename))
    }
}
