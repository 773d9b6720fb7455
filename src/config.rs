// src/config.rs
// =============================================================================
// Settings for a scan, optionally loaded from a TOML file.
//
// Every field has a default, so a config file only needs the keys you want
// to change:
//
//   user_agent = "my-docs-bot/1.0"
//   probe_timeout_secs = 5
//   navigation_timeout_secs = 20
//   chrome_executable = "/usr/bin/chromium"
//   clone_dir = "checkouts/docs"
//
// Unknown keys are rejected so a typo doesn't silently do nothing.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

// Some sites reject requests that don't look like they come from a browser
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// User-Agent header sent by the HTTP probe
    pub user_agent: String,
    /// Timeout for one HTTP probe, in seconds
    pub probe_timeout_secs: u64,
    /// Timeout for one browser navigation, in seconds
    pub navigation_timeout_secs: u64,
    /// Chrome/Chromium binary; searched for automatically when unset
    pub chrome_executable: Option<PathBuf>,
    /// Where repositories are cloned to
    pub clone_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            probe_timeout_secs: 10,
            navigation_timeout_secs: 30,
            chrome_executable: None,
            clone_dir: PathBuf::from("repo"),
        }
    }
}

impl Config {
    /// Reads a config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}
