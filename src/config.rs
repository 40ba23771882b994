//! Configuration for the zkillstats renderer
//!
//! Every field has a default matching the upstream API's expectations, so a
//! config file is only needed to override them. `ZKILLSTATS_API_HOST` wins
//! over both, which is how the HTTP tests point the client at a local server.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// zKillboard API host
pub const DEFAULT_API_HOST: &str = "https://zkillboard.com";

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_user_agent() -> String {
    format!("zkillstats/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_redirects() -> usize {
    3
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the stats API
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// User-agent header sent with every upstream request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum redirects to follow per request
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// How long a cached stats payload stays fresh, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".zkillstats").join("config.yaml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; a missing default file just means
    /// defaults. The `ZKILLSTATS_API_HOST` env var overrides the host.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(host) = std::env::var("ZKILLSTATS_API_HOST")
            && !host.is_empty()
        {
            config.api_host = host;
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }
}
