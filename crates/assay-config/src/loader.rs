//! Configuration Loader
//!
//! Handles loading and merging settings from multiple sources with proper precedence.

use crate::settings::SettingsFile;
use crate::{ConfigError, ConfigResult, ReportFormat, ReportSettings};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the per-project settings file
pub const PROJECT_FILE_NAME: &str = "assay.toml";

/// Configuration loader
///
/// Loads settings from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.assay/config.toml) - lowest priority
/// 2. Project config (./assay.toml) - overrides global
/// 3. Environment variables (ASSAY_*, NO_COLOR) - overrides project
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project settings, with environment overrides applied
    pub project: SettingsFile,

    /// Global settings
    pub global: SettingsFile,

    /// Directory where assay.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use an explicit global settings file instead of ~/.assay/config.toml
    pub fn with_global_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find assay.toml, then loads and merges
    /// global config if it exists.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project) = self.find_project_config(start_dir)?;

        // A broken global file should not stop a test run
        let global = self.load_global_config().unwrap_or_default();

        let project = self.apply_env_overrides(project)?;

        Ok(Config {
            project,
            global,
            project_root,
        })
    }

    /// Load configuration from a specific project settings file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = SettingsFile::load_from_file(config_path)?;
        let global = self.load_global_config().unwrap_or_default();
        let project = self.apply_env_overrides(project)?;

        Ok(Config {
            project,
            global,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project settings by walking up the directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, SettingsFile)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_FILE_NAME);

            if config_path.exists() {
                let settings = SettingsFile::load_from_file(&config_path)?;
                return Ok((Some(current), settings));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, SettingsFile::default())),
            }
        }
    }

    /// Load global settings from ~/.assay/config.toml
    fn load_global_config(&mut self) -> ConfigResult<SettingsFile> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => {
                let path = Self::global_config_dir()?.join("config.toml");
                self.global_config_path = Some(path.clone());
                path
            }
        };

        // Global config is optional
        if !path.exists() {
            return Ok(SettingsFile::default());
        }

        SettingsFile::load_from_file(&path)
    }

    /// Apply environment variable overrides to project settings
    ///
    /// - ASSAY_FORMAT=console|json
    /// - ASSAY_VERBOSE=true|false
    /// - ASSAY_NO_COLOR=true|false
    /// - NO_COLOR=<anything non-empty> disables color
    fn apply_env_overrides(&self, mut settings: SettingsFile) -> ConfigResult<SettingsFile> {
        if let Ok(format) = env::var("ASSAY_FORMAT") {
            let format: ReportFormat = format.parse()?;
            settings.report_mut().format = Some(format.as_str().to_string());
        }

        if let Ok(verbose) = env::var("ASSAY_VERBOSE") {
            settings.report_mut().verbose = Some(parse_flag("ASSAY_VERBOSE", &verbose)?);
        }

        if let Ok(no_color) = env::var("ASSAY_NO_COLOR") {
            settings.report_mut().color = Some(!parse_flag("ASSAY_NO_COLOR", &no_color)?);
        }

        if env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()) {
            settings.report_mut().color = Some(false);
        }

        Ok(settings)
    }

    /// Get the global configuration directory (~/.assay)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".assay"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

impl Config {
    /// Effective report format (project > global > default)
    pub fn format(&self) -> ReportFormat {
        self.project
            .format()
            .or_else(|| self.global.format())
            .unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.project
            .verbose()
            .or_else(|| self.global.verbose())
            .unwrap_or(ReportSettings::default().verbose)
    }

    pub fn color(&self) -> bool {
        self.project
            .color()
            .or_else(|| self.global.color())
            .unwrap_or(ReportSettings::default().color)
    }

    /// Resolve every reporter setting
    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            format: self.format(),
            verbose: self.verbose(),
            color: self.color(),
        }
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if an assay.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
