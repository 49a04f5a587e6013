//! Configuration file management for sprout.
//!
//! Provides a TOML-based config file at `~/.config/sprout/config.toml` and a
//! resolution chain for the data file: CLI flag > env var > config file >
//! default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use sprout_store::json::default_data_path;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    /// Path of the JSON garden data file.
    pub data_file: Option<PathBuf>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the sprout config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/sprout` or `~/.config/sprout`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("sprout");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("sprout")
}

/// Return the path to the sprout config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct SproutConfig {
    pub data_file: PathBuf,
}

impl SproutConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config
    /// file > default.
    ///
    /// Data file: `cli_data_file` > `SPROUT_DATA_FILE` env >
    /// `config_file.storage.data_file` > the XDG default data path.
    pub fn resolve(cli_data_file: Option<&Path>) -> Result<Self> {
        let file_config = load_config().ok();
        let env = std::env::var("SPROUT_DATA_FILE").ok();
        let from_file = file_config.and_then(|c| c.storage.data_file);
        Ok(Self {
            data_file: resolve_data_file(cli_data_file, env.as_deref(), from_file),
        })
    }
}

fn resolve_data_file(
    cli: Option<&Path>,
    env: Option<&str>,
    file: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }
    if let Some(path) = env {
        return PathBuf::from(path);
    }
    if let Some(path) = file {
        return path;
    }
    default_data_path()
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
