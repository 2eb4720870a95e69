//! Configuration loading.
//!
//! `config.toml` lives in `~/.turnbridge/` unless a path is given on the
//! command line. Every section is optional; a missing file yields defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::platforms::Platform;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Log verbosity.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output formatting for the CLI.
    #[serde(default)]
    pub output: OutputConfig,

    /// Platform selection.
    #[serde(default)]
    pub platform: PlatformConfig,
}

/// Log verbosity settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "debug").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// CLI output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON written to stdout.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// Platform selection settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformConfig {
    /// Platform assumed for every payload. Unset means detect per payload.
    #[serde(default)]
    pub default: Option<Platform>,
}

// Default value functions for serde

fn default_log_level() -> String {
    "info".to_owned()
}
fn default_pretty() -> bool {
    true
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Load configuration from `path`, or defaults if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_or_default(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file found, using defaults");
        return Ok(Config::default());
    }
    tracing::debug!(path = %path.display(), "loading config from file");
    load_config(path)
}

/// Resolve the default config directory (`~/.turnbridge/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".turnbridge"))
}

/// Resolve the default config file path (`~/.turnbridge/config.toml`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
