//! Configuration file loading with precedence handling.

use crate::config::{
    DEFAULT_BAUD, DEFAULT_LOG_FILE, DEFAULT_READ_TIMEOUT_MS, MAX_MSG_CAPACITY, MAX_POINT_CAPACITY,
    MSG_BUFF_SIZE,
};
use crate::model::DisplayMode;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A resolved value is out of range.
    #[error("{field} {reason}")]
    Invalid {
        /// Name of the offending setting.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/serial-monitor/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Baud rate used when opening the port.
    #[serde(default)]
    pub baud: Option<u32>,

    /// Driver read timeout in milliseconds.
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,

    /// Initial display mode ("text" or "plot", any case).
    #[serde(default, deserialize_with = "deserialize_mode")]
    pub mode: Option<DisplayMode>,

    /// Write diagnostics to the log file.
    #[serde(default)]
    pub logs: Option<bool>,

    /// Log file location.
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Number of messages retained by the store.
    #[serde(default)]
    pub message_capacity: Option<usize>,

    /// Number of points shown by the plot.
    #[serde(default)]
    pub plot_points: Option<usize>,

    /// Capacity of the reader → event loop queue.
    #[serde(default)]
    pub queue_capacity: Option<usize>,
}

fn deserialize_mode<'de, D>(deserializer: D) -> Result<Option<DisplayMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| s.parse().map_err(serde::de::Error::custom))
        .transpose()
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Baud rate.
    pub baud: u32,
    /// Read timeout in milliseconds.
    pub read_timeout_ms: u64,
    /// Display mode at startup.
    pub mode: DisplayMode,
    /// Whether diagnostics go to the log file.
    pub logs_enabled: bool,
    /// Log file location.
    pub log_file_path: PathBuf,
    /// Message store capacity.
    pub message_capacity: usize,
    /// Plot point capacity.
    pub plot_points: usize,
    /// Message queue capacity.
    pub queue_capacity: usize,
}

impl ResolvedConfig {
    /// Read timeout as a [`Duration`].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            baud: DEFAULT_BAUD,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            mode: DisplayMode::Text,
            logs_enabled: false,
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE),
            message_capacity: MAX_MSG_CAPACITY,
            plot_points: MAX_POINT_CAPACITY,
            queue_capacity: MSG_BUFF_SIZE,
        }
    }
}

/// Flags given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--baud`
    pub baud: Option<u32>,
    /// `--read-timeout-ms`
    pub read_timeout_ms: Option<u64>,
    /// `--mode`
    pub mode: Option<DisplayMode>,
    /// `--logs` (only `Some(true)` when the flag is present)
    pub logs: Option<bool>,
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/serial-monitor/config.toml` on Unix, the platform
/// equivalent elsewhere, or `None` if no config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("serial-monitor").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SERIAL_MONITOR_CONFIG` environment variable
/// 3. Default path
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("SERIAL_MONITOR_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        baud: config.baud.unwrap_or(defaults.baud),
        read_timeout_ms: config.read_timeout_ms.unwrap_or(defaults.read_timeout_ms),
        mode: config.mode.unwrap_or(defaults.mode),
        logs_enabled: config.logs.unwrap_or(defaults.logs_enabled),
        log_file_path: config.log_file.unwrap_or(defaults.log_file_path),
        message_capacity: config.message_capacity.unwrap_or(defaults.message_capacity),
        plot_points: config.plot_points.unwrap_or(defaults.plot_points),
        queue_capacity: config.queue_capacity.unwrap_or(defaults.queue_capacity),
    }
}

/// An environment override that was present but did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    /// Variable name.
    pub variable: &'static str,
    /// Raw value as found in the environment.
    pub value: String,
}

impl RejectedOverride {
    /// Emit the warning for this override.
    ///
    /// Call once the subscriber is installed; before that the event is lost.
    pub fn log(&self) {
        warn!(
            variable = self.variable,
            value = %self.value,
            "Ignoring unparsable environment override"
        );
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `SERIAL_MONITOR_BAUD`, `SERIAL_MONITOR_READ_TIMEOUT_MS`,
/// `SERIAL_MONITOR_MODE` and `SERIAL_MONITOR_LOGS`. Values that do not parse
/// leave the setting untouched and are returned so the caller can report
/// them after logging is set up.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> (ResolvedConfig, Vec<RejectedOverride>) {
    let mut rejected = Vec::new();

    if let Some(baud) = env_value("SERIAL_MONITOR_BAUD", &mut rejected) {
        config.baud = baud;
    }
    if let Some(timeout) = env_value("SERIAL_MONITOR_READ_TIMEOUT_MS", &mut rejected) {
        config.read_timeout_ms = timeout;
    }
    if let Some(mode) = env_value("SERIAL_MONITOR_MODE", &mut rejected) {
        config.mode = mode;
    }
    if let Some(logs) = env_value("SERIAL_MONITOR_LOGS", &mut rejected) {
        config.logs_enabled = logs;
    }

    (config, rejected)
}

fn env_value<T: std::str::FromStr>(
    name: &'static str,
    rejected: &mut Vec<RejectedOverride>,
) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            rejected.push(RejectedOverride {
                variable: name,
                value: raw,
            });
            None
        }
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence; only flags the user actually gave
/// are applied.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(baud) = cli.baud {
        config.baud = baud;
    }
    if let Some(timeout) = cli.read_timeout_ms {
        config.read_timeout_ms = timeout;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(logs) = cli.logs {
        config.logs_enabled = logs;
    }

    config
}

/// Reject configurations the pipeline cannot run with.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` naming the first zero capacity found.
pub fn validate(config: &ResolvedConfig) -> Result<(), ConfigError> {
    let capacities = [
        ("message_capacity", config.message_capacity),
        ("plot_points", config.plot_points),
        ("queue_capacity", config.queue_capacity),
    ];
    for (field, value) in capacities {
        if value == 0 {
            return Err(ConfigError::Invalid {
                field,
                reason: "must be at least 1".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
