//! Settings files (assay.toml and ~/.assay/config.toml)
//!
//! Both files share one schema; the loader merges them.

use crate::{ConfigError, ConfigResult, ReportFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of a settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Reporter settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportSection>,
}

/// `[report]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    /// "console" or "json"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl SettingsFile {
    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate field values that serde cannot check
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(format) = self.report.as_ref().and_then(|r| r.format.as_deref()) {
            format.parse::<ReportFormat>()?;
        }
        Ok(())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(&mut self, other: &SettingsFile) {
        let Some(theirs) = &other.report else {
            return;
        };
        let ours = self.report.get_or_insert_with(ReportSection::default);
        if theirs.format.is_some() {
            ours.format = theirs.format.clone();
        }
        if theirs.verbose.is_some() {
            ours.verbose = theirs.verbose;
        }
        if theirs.color.is_some() {
            ours.color = theirs.color;
        }
    }

    pub fn format(&self) -> Option<ReportFormat> {
        self.report
            .as_ref()
            .and_then(|r| r.format.as_deref())
            .and_then(|f| f.parse().ok())
    }

    pub fn verbose(&self) -> Option<bool> {
        self.report.as_ref().and_then(|r| r.verbose)
    }

    pub fn color(&self) -> Option<bool> {
        self.report.as_ref().and_then(|r| r.color)
    }

    pub(crate) fn report_mut(&mut self) -> &mut ReportSection {
        self.report.get_or_insert_with(ReportSection::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_settings() {
        let settings: SettingsFile = toml::from_str("").unwrap();
        assert_eq!(settings, SettingsFile::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_full_report_section() {
        let settings: SettingsFile = toml::from_str(
            r#"
[report]
format = "json"
verbose = false
color = false
"#,
        )
        .unwrap();

        assert_eq!(settings.format(), Some(ReportFormat::Json));
        assert_eq!(settings.verbose(), Some(false));
        assert_eq!(settings.color(), Some(false));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<SettingsFile, _> = toml::from_str(
            r#"
[report]
colour = true
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format_fails_validation() {
        let settings: SettingsFile = toml::from_str(
            r#"
[report]
format = "xml"
"#,
        )
        .unwrap();

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("report.format"));
    }

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let mut base: SettingsFile = toml::from_str(
            r#"
[report]
format = "json"
verbose = true
"#,
        )
        .unwrap();
        let overlay: SettingsFile = toml::from_str(
            r#"
[report]
verbose = false
"#,
        )
        .unwrap();

        base.merge(&overlay);

        assert_eq!(base.format(), Some(ReportFormat::Json));
        assert_eq!(base.verbose(), Some(false));
        assert_eq!(base.color(), None);
    }

    #[test]
    fn test_merge_into_empty() {
        let mut base = SettingsFile::default();
        let overlay: SettingsFile = toml::from_str("[report]\ncolor = false\n").unwrap();

        base.merge(&overlay);

        assert_eq!(base.color(), Some(false));
    }
}
