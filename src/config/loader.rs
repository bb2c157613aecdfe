//! Configuration file loading with precedence handling.

use crate::virtual_scroll::{ScrollTuning, DEFAULT_BLOCK_PX, DEFAULT_BUFFER_PX};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default intrinsic row height for nodes that do not specify one.
pub const DEFAULT_NODE_HEIGHT: f64 = 22.0;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

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
}

/// A configuration value that was rejected and replaced.
///
/// Config is resolved before logging exists, so rejections are collected on
/// [`ResolvedConfig::warnings`] and logged once the subscriber is installed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigWarning {
    /// `block_px` was zero or negative.
    #[error("block_px must be positive, got {0}; using default")]
    NonPositiveBlockSize(f64),

    /// An environment override could not be parsed.
    #[error("ignoring invalid {var}={value:?}")]
    InvalidEnvValue {
        /// Variable name.
        var: &'static str,
        /// Raw value as found in the environment.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/treescroll/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Apply viewport windowing at all.
    #[serde(default)]
    pub use_virtual_scroll: Option<bool>,

    /// Extra pixels rendered above and below the viewport.
    #[serde(default)]
    pub buffer_px: Option<f64>,

    /// Minimum scroll delta in pixels before the window is recomputed.
    #[serde(default)]
    pub block_px: Option<f64>,

    /// Row height for tree-file nodes without an explicit height.
    #[serde(default)]
    pub default_node_height: Option<f64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Apply viewport windowing.
    pub use_virtual_scroll: bool,
    /// Extra pixels rendered around the viewport.
    pub buffer_px: f64,
    /// Always > 0 after [`merge_config`].
    pub block_px: f64,
    /// Row height for nodes without one.
    pub default_node_height: f64,
    /// Where tracing output goes.
    pub log_file_path: PathBuf,
    /// Values rejected while resolving, in the order they were seen.
    pub warnings: Vec<ConfigWarning>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            use_virtual_scroll: true,
            buffer_px: DEFAULT_BUFFER_PX,
            block_px: DEFAULT_BLOCK_PX,
            default_node_height: DEFAULT_NODE_HEIGHT,
            log_file_path: default_log_path(),
            warnings: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Windowing constants for the virtual-scroll controller.
    pub fn tuning(&self) -> ScrollTuning {
        ScrollTuning::new(self.buffer_px, self.block_px)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/treescroll/treescroll.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("treescroll").join("treescroll.log")
    } else {
        PathBuf::from("treescroll.log")
    }
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
/// Returns `~/.config/treescroll/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("treescroll").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TREESCROLL_CONFIG` environment variable
/// 3. Default path `~/.config/treescroll/config.toml`
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

    match std::env::var("TREESCROLL_CONFIG") {
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()));
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// A non-positive `block_px` falls back to the default and is recorded as a
/// [`ConfigWarning`].
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let mut warnings = Vec::new();
    let block_px = match config.block_px {
        Some(px) if px > 0.0 => px,
        Some(px) => {
            warnings.push(ConfigWarning::NonPositiveBlockSize(px));
            defaults.block_px
        }
        None => defaults.block_px,
    };

    ResolvedConfig {
        use_virtual_scroll: config
            .use_virtual_scroll
            .unwrap_or(defaults.use_virtual_scroll),
        buffer_px: config.buffer_px.unwrap_or(defaults.buffer_px),
        block_px,
        default_node_height: config
            .default_node_height
            .unwrap_or(defaults.default_node_height),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        warnings,
    }
}

fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TREESCROLL_VIRTUAL_SCROLL`: `1/true/yes/on` or `0/false/no/off`
/// - `TREESCROLL_BUFFER_PX`: buffer in pixels
///
/// Unparseable values are ignored and recorded as a [`ConfigWarning`].
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    const VIRTUAL_SCROLL: &str = "TREESCROLL_VIRTUAL_SCROLL";
    const BUFFER_PX: &str = "TREESCROLL_BUFFER_PX";

    if let Ok(raw) = std::env::var(VIRTUAL_SCROLL) {
        match parse_bool_flag(&raw) {
            Some(enabled) => config.use_virtual_scroll = enabled,
            None => config.warnings.push(ConfigWarning::InvalidEnvValue {
                var: VIRTUAL_SCROLL,
                value: raw,
            }),
        }
    }

    if let Ok(raw) = std::env::var(BUFFER_PX) {
        match raw.trim().parse::<f64>() {
            Ok(px) => config.buffer_px = px,
            Err(_) => config.warnings.push(ConfigWarning::InvalidEnvValue {
                var: BUFFER_PX,
                value: raw,
            }),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Arguments
///
/// * `config` - Base resolved config (already merged with defaults, file, and env vars)
/// * `virtual_scroll_override` - `Some(false)` from `--no-virtual-scroll`
/// * `buffer_override` - Optional buffer from `--buffer`
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    virtual_scroll_override: Option<bool>,
    buffer_override: Option<f64>,
) -> ResolvedConfig {
    if let Some(enabled) = virtual_scroll_override {
        config.use_virtual_scroll = enabled;
    }

    if let Some(buffer) = buffer_override {
        config.buffer_px = buffer;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_treescroll_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("treescroll.log"),
            "Default log path should end with 'treescroll.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(
            !config.log_file_path.as_os_str().is_empty(),
            "Default config should have non-empty log_file_path"
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(
            resolved.log_file_path, custom_path,
            "Config file log_file_path should override default"
        );
    }

    #[test]
    fn missing_config_file_log_path_uses_default() {
        let resolved = merge_config(Some(ConfigFile::default()));
        assert_eq!(resolved.log_file_path, default_log_path());
    }
}
