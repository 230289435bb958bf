//! Configuration management for Cinescope
//!
//! Credentials come from the environment (optionally seeded from a `.env`
//! file) and are required. Tunables live in an optional TOML file at
//! ~/.config/cinescope/config.toml.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::api::tmdb::DEFAULT_LANGUAGE;
use crate::models::DEFAULT_IMAGE_BASE;

/// Environment variable holding the API base address
pub const API_URL_VAR: &str = "API_URL";
/// Environment variable holding the bearer credential
pub const ACCESS_TOKEN_VAR: &str = "TMDB_ACCESS_TOKEN";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Tunables read from the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `language` query parameter sent with every request
    pub language: String,
    /// Quiet period before a typed query is sent
    pub debounce_ms: u64,
    /// Shortest query (in characters) that triggers a search
    pub min_query_len: usize,
    /// Base for image URLs
    pub image_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            debounce_ms: 300,
            min_query_len: 3,
            image_base_url: DEFAULT_IMAGE_BASE.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Default settings file path (~/.config/cinescope/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cinescope").join("config.toml"))
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read settings from an explicit file
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, falling back to defaults
    ///
    /// A missing default file is silent; an unreadable or invalid one is
    /// logged and ignored.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit.map(Path::to_path_buf).or_else(Self::path) {
            Some(path) => path,
            None => return Self::default(),
        };
        if explicit.is_none() && !path.exists() {
            return Self::default();
        }
        match Self::read(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "using default settings");
                Self::default()
            }
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub access_token: String,
    pub settings: Settings,
}

impl Config {
    /// Load `.env`, then read credentials from the process environment
    pub fn from_env(settings_path: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is normal; real environment variables still apply
        let _ = dotenvy::dotenv();
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            Settings::load(settings_path),
        )
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F, settings: Settings) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            api_url: required(API_URL_VAR)?,
            access_token: required(ACCESS_TOKEN_VAR)?,
            settings,
        })
    }

    pub fn debounce_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.settings.debounce_ms)
    }
}
