//! User configuration
//!
//! circ needs almost no configuration; the one thing worth overriding is
//! where the data file lives. Configuration is read from
//! `~/.config/circ/config.toml` (location per platform conventions) and is
//! entirely optional.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Optional user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Override for the data directory
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Loads the user configuration, defaulting when no file exists
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Platform config file location, if a home directory exists
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "circ").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Effective data directory: the configured override, the platform
    /// data dir, or `.circ` in the working directory as a last resort
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        ProjectDirs::from("", "", "circ")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".circ"))
    }
}
