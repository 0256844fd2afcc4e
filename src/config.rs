//! Configuration management for fractus
//!
//! Settings are loaded from environment variables with defaults, then
//! overridden by command-line flags.
//!
//! # Environment Variables
//!
//! - `FRACTUS_ASSETS_DIR`: Asset root holding `core/`, `vendor/`, `syntaxes/` and `themes/` - default: "assets"
//! - `FRACTUS_BANNER`: Emit header comments and section markers (true|false) - default: "true"
//! - `FRACTUS_LOG_LEVEL`: Logging level - default: "info"
//! - `FRACTUS_LOG_JSON`: Emit logs as JSON lines (true|false) - default: "false"

use crate::util::logging::level_from_str;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_ASSETS_DIR: &str = "assets";
const DEFAULT_BANNER: bool = true;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractusConfig {
    /// Asset root directory
    pub assets_dir: PathBuf,

    /// Emit header comments and section markers in bundles
    pub banner: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for FractusConfig {
    /// Loads FRACTUS_* environment variables, falling back to defaults
    fn default() -> Self {
        let assets_dir = env::var("FRACTUS_ASSETS_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));

        let banner = env::var("FRACTUS_BANNER")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_BANNER);

        let log_level = env::var("FRACTUS_LOG_LEVEL")
            .map(|v| normalize_log_level(&v))
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Self {
            assets_dir,
            banner,
            log_level,
        }
    }
}

impl FractusConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Assets directory must not be empty".to_string(),
            ));
        }

        if level_from_str(&self.log_level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }
}

/// Lowercases a known level name. Unknown names become the default level,
/// matching the fallback the logging setup applies to the same value.
pub fn normalize_log_level(level_str: &str) -> String {
    match level_from_str(level_str) {
        Some(_) => level_str.to_lowercase(),
        None => DEFAULT_LOG_LEVEL.to_string(),
    }
}

impl fmt::Display for FractusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fractus Configuration:")?;
        writeln!(f, "  Assets Dir: {}", self.assets_dir.display())?;
        writeln!(f, "  Banner: {}", self.banner)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
