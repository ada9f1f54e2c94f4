//! Assay Configuration System
//!
//! Provides the settings that control how a test run is reported:
//! - Project settings (assay.toml, found by walking up from a directory)
//! - Global user settings (~/.assay/config.toml)
//! - Environment overrides (ASSAY_*, NO_COLOR)
//!
//! # Configuration Hierarchy
//!
//! Settings are merged in the following order (later overrides earlier):
//! 1. Global config (~/.assay/config.toml)
//! 2. Project config (./assay.toml)
//! 3. Environment variables (ASSAY_FORMAT, ASSAY_VERBOSE, ASSAY_NO_COLOR, NO_COLOR)
//!
//! # Example
//!
//! ```no_run
//! use assay_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! let settings = config.report_settings();
//! ```

pub mod loader;
pub mod settings;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Output format of a test run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable console lines
    #[default]
    Console,
    /// A single JSON document written when the run finishes
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Console => "console",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" | "text" => Ok(ReportFormat::Console),
            "json" => Ok(ReportFormat::Json),
            other => Err(ConfigError::InvalidValue {
                field: "report.format".to_string(),
                reason: format!("unknown format '{}' (expected \"console\" or \"json\")", other),
            }),
        }
    }
}

/// Fully resolved reporter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    pub format: ReportFormat,
    /// Print one line per assertion instead of only failures
    pub verbose: bool,
    /// Emit ANSI colors
    pub color: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: ReportFormat::Console,
            verbose: true,
            color: true,
        }
    }
}

// Re-export main types
pub use loader::{Config, ConfigLoader};
pub use settings::{ReportSection, SettingsFile};
