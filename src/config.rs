use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::DEFAULT_API_URL;
use crate::error::{LinearError, Result};

pub const API_KEY_ENV: &str = "LINEAR_API_KEY";
pub const API_URL_ENV: &str = "LINEAR_API_URL";

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| LinearError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| LinearError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let write_err = |e| LinearError::ConfigWrite {
            path: config_path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(config_path, toml::to_string(self)?).map_err(write_err)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "linear-mcp")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(LinearError::NoConfigDir)
    }

    /// Get API key with env var taking precedence over config file
    pub fn api_key(&self) -> Result<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Get endpoint: explicit flag, then env var, then config file, then the default
    pub fn api_url(&self, explicit: Option<&str>) -> Result<String> {
        self.resolve_api_url(explicit, std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.is_empty())
            .ok_or(LinearError::MissingApiKey)
    }

    fn resolve_api_url(&self, explicit: Option<&str>, from_env: Option<String>) -> Result<String> {
        let url = explicit
            .map(String::from)
            .or(from_env.filter(|url| !url.is_empty()))
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Url::parse(&url).map_err(|_| LinearError::InvalidUrl(url.clone()))?;
        Ok(url)
    }
}
