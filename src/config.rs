//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. An explicit path (`--config`)
//! 2. `$MAILTABLE_CONFIG` (environment variable, read by the CLI)
//! 3. `~/.config/mailtable/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailtable\config.toml` (Windows)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::codec::{CountByteOrder, DecodeOptions};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Binary format settings.
    pub codec: CodecConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Also append logs to this file.
    pub log_file: Option<PathBuf>,
}

/// Binary format settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Byte order of the leading entry count: "big" or "little".
    pub byte_order: CountByteOrder,
    /// Ignore data after the declared entries instead of failing.
    pub allow_trailing_bytes: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

impl CodecConfig {
    /// Options for decoding binary tables.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            byte_order: self.byte_order,
            allow_trailing_bytes: self.allow_trailing_bytes,
        }
    }
}

/// Result of [`load_config`]: the configuration plus anything worth logging.
///
/// Config is loaded before logging is installed, so messages are handed back
/// to the caller instead of being emitted here.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the configuration came from, if any.
    pub path: Option<PathBuf>,
    /// Problems with an auto-discovered file that caused a fallback to defaults.
    pub warnings: Vec<String>,
}

/// Load configuration.
///
/// An `explicit` path (from `--config` or `$MAILTABLE_CONFIG`) must exist and
/// parse, otherwise this fails. An auto-discovered file that is unreadable or
/// invalid falls back to the defaults with a warning.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = read_config_file(path)?;
        return Ok(LoadedConfig {
            config,
            path: Some(path.to_path_buf()),
            warnings: Vec::new(),
        });
    }

    Ok(match config_file_path().filter(|p| p.exists()) {
        Some(path) => load_discovered(path),
        None => LoadedConfig::default(),
    })
}

fn load_discovered(path: PathBuf) -> LoadedConfig {
    match read_config_file(&path) {
        Ok(config) => LoadedConfig {
            config,
            path: Some(path),
            warnings: Vec::new(),
        },
        Err(e) => LoadedConfig {
            warnings: vec![format!("{e:#}; using defaults")],
            ..Default::default()
        },
    }
}

/// Read and parse one config file.
pub fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

/// Default config file location in the platform config directory.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mailtable").join("config.toml"))
}
