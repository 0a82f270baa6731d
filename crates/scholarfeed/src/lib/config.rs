//! Run configuration, read from a TOML file.
//!
//! Every key is optional. A file that only overrides `output_dir` still runs
//! the full built-in author registry against the public API.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::author::{Author, default_registry};

pub const DEFAULT_CONFIG_PATH: &str = "scholarfeed.toml";
pub const DEFAULT_API_BASE: &str = "https://api.semanticscholar.org/graph/v1";
pub const DEFAULT_FIELDS: &str = "title,abstract,year,venue,publicationDate,url";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {error}")]
    Read {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Failed to parse config {path}: {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory the feed files are written to.
    pub output_dir: PathBuf,
    pub api_base: Url,
    /// Comma separated `fields` query parameter.
    pub fields: String,
    /// Page size; only the first page is fetched.
    pub limit: u32,
    pub timeout_secs: u64,
    pub pacing: PacingConfig,
    pub authors: Vec<Author>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("rss"),
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            fields: DEFAULT_FIELDS.to_string(),
            limit: 100,
            timeout_secs: 30,
            pacing: PacingConfig::default(),
            authors: default_registry(),
        }
    }
}

/// Delay inserted between consecutive authors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacingConfig {
    pub delay_secs: u64,
    /// Also wait after an author whose processing failed.
    pub after_failure: bool,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            delay_secs: 3,
            after_failure: false,
        }
    }
}

impl PacingConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|error| ConfigError::Parse {
            error,
            path: path.to_path_buf(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
            error,
            path: path.to_path_buf(),
        })?;
        Self::parse(&raw, path)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "No config file found, using built-in defaults");
            Ok(Self::default())
        }
    }
}
