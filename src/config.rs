//! Configuration management
//!
//! Handles loading, saving, and locating application settings and data.

use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::presenter::DEFAULT_PAGE_SIZE;
use crate::profile::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Directory name used under the platform config and data directories
pub const APP_DIR: &str = "league-guider";

const CONFIG_FILENAME: &str = "config.json";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Champions shown per page
    pub page_size: NonZeroUsize,

    /// Where champion data lives; platform data dir when unset
    pub data_dir: Option<PathBuf>,

    /// Endpoint pre-filled into new AI profiles
    pub default_endpoint: String,

    /// Model pre-filled into new AI profiles
    pub default_model: String,

    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: None,
            default_endpoint: DEFAULT_ENDPOINT.into(),
            default_model: DEFAULT_MODEL.into(),
            log_filter: "info".into(),
        }
    }
}

impl Config {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// `log_filter` from an existing config file.
    ///
    /// Creates nothing and never fails, so logging can be set up before the
    /// config is loaded for real.
    pub fn stored_log_filter() -> Option<String> {
        let path = dirs::config_dir()?.join(APP_DIR).join(CONFIG_FILENAME);
        let data = fs::read_to_string(path).ok()?;
        log_filter_in(&data)
    }

    /// Load config from disk or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let data = fs::read_to_string(&path).context("Failed to read config file")?;
            serde_json::from_str(&data).context("Failed to parse config file")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, data).context("Failed to write config file")?;
        Ok(())
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .context("Failed to find data directory")?
            .join(APP_DIR);

        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(data_dir)
    }

    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to find config directory")?
            .join(APP_DIR);

        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        Ok(config_dir)
    }

    /// Root of the champion data, honouring the `data_dir` override
    pub fn champion_data_dir(&self) -> Result<PathBuf> {
        match self.data_dir {
            Some(ref dir) => Ok(dir.clone()),
            None => Ok(Self::data_dir()?.join("league-data")),
        }
    }
}

fn log_filter_in(data: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(data).ok()?;
    value["log_filter"].as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{ "page_size": 12 }"#).unwrap();
        assert_eq!(config.page_size.get(), 12);
        assert_eq!(config.default_model, DEFAULT_MODEL);
        assert_eq!(config.log_filter, "info");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{ "page_size": 0 }"#).is_err());
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/lg-data")),
            ..Config::default()
        };
        assert_eq!(config.champion_data_dir().unwrap(), PathBuf::from("/tmp/lg-data"));
    }

    #[test]
    fn test_log_filter_in() {
        assert_eq!(
            log_filter_in(r#"{ "page_size": 0, "log_filter": "debug" }"#).as_deref(),
            Some("debug")
        );
        assert_eq!(log_filter_in(r#"{ "page_size": 12 }"#), None);
        assert_eq!(log_filter_in("not json"), None);
    }
}
