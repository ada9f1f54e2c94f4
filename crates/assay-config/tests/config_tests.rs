//! Settings loading and precedence tests

use assay_config::{ConfigError, ConfigLoader, ReportFormat, ReportSettings, SettingsFile};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn clear_env() {
    for var in ["ASSAY_FORMAT", "ASSAY_VERBOSE", "ASSAY_NO_COLOR", "NO_COLOR"] {
        env::remove_var(var);
    }
}

// ============================================================================
// Loading
// ============================================================================

#[test]
#[serial]
fn test_load_project_settings() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    write_file(
        temp_dir.path(),
        "assay.toml",
        r#"
[report]
format = "json"
verbose = false
color = false
"#,
    );

    let mut loader = ConfigLoader::new().with_global_config_path(temp_dir.path().join("none"));
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert!(config.is_project());
    assert_eq!(
        config.report_settings(),
        ReportSettings {
            format: ReportFormat::Json,
            verbose: false,
            color: false,
        }
    );
}

#[test]
#[serial]
fn test_global_settings_fill_gaps() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let global = write_file(temp_dir.path(), "global.toml", "[report]\ncolor = false\nverbose = false\n");
    write_file(temp_dir.path(), "assay.toml", "[report]\nverbose = true\n");

    let mut loader = ConfigLoader::new().with_global_config_path(global);
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    // project wins where set, global fills the rest
    assert!(config.verbose());
    assert!(!config.color());
    assert_eq!(config.format(), ReportFormat::Console);
}

#[test]
#[serial]
fn test_broken_global_settings_are_ignored() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let global = write_file(temp_dir.path(), "global.toml", "[report\n");
    write_file(temp_dir.path(), "assay.toml", "");

    let mut loader = ConfigLoader::new().with_global_config_path(global);
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert_eq!(config.report_settings(), ReportSettings::default());
}

#[test]
#[serial]
fn test_load_from_specific_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "custom.toml", "[report]\nformat = \"json\"\n");

    let mut loader = ConfigLoader::new().with_global_config_path(temp_dir.path().join("none"));
    let config = loader.load_from_file(&path).unwrap();

    assert_eq!(config.format(), ReportFormat::Json);
    assert_eq!(config.project_root(), Some(temp_dir.path()));
}

#[test]
fn test_missing_specific_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut loader = ConfigLoader::new().with_global_config_path(temp_dir.path().join("none"));

    let result = loader.load_from_file(&temp_dir.path().join("missing.toml"));

    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

// ============================================================================
// Invalid settings
// ============================================================================

#[rstest]
#[case("[report\nformat = \"json\"")]
#[case("[report]\nformat = 3\n")]
#[case("[reporting]\nformat = \"json\"\n")]
fn test_invalid_toml_rejected(#[case] content: &str) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "assay.toml", content);

    let result = SettingsFile::load_from_file(&path);

    assert!(matches!(result, Err(ConfigError::TomlParseError { .. })));
}

#[test]
fn test_invalid_format_value_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "assay.toml", "[report]\nformat = \"html\"\n");

    let result = SettingsFile::load_from_file(&path);

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

// ============================================================================
// Environment overrides
// ============================================================================

#[test]
#[serial]
fn test_no_color_env_disables_color() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "assay.toml", "[report]\ncolor = true\n");

    env::set_var("NO_COLOR", "1");
    let config = ConfigLoader::new()
        .with_global_config_path(temp_dir.path().join("none"))
        .load_from_directory(temp_dir.path());
    clear_env();

    assert!(!config.unwrap().color());
}

#[test]
#[serial]
fn test_assay_verbose_env_overrides_project() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "assay.toml", "[report]\nverbose = true\n");

    env::set_var("ASSAY_VERBOSE", "0");
    let config = ConfigLoader::new()
        .with_global_config_path(temp_dir.path().join("none"))
        .load_from_directory(temp_dir.path());
    clear_env();

    assert!(!config.unwrap().verbose());
}

#[test]
#[serial]
fn test_invalid_format_env_is_error() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    env::set_var("ASSAY_FORMAT", "yaml");
    let result = ConfigLoader::new()
        .with_global_config_path(temp_dir.path().join("none"))
        .load_from_directory(temp_dir.path());
    clear_env();

    assert!(result.is_err());
}

#[rstest]
#[case("console", ReportFormat::Console)]
#[case("JSON", ReportFormat::Json)]
#[case(" text ", ReportFormat::Console)]
fn test_report_format_parse(#[case] input: &str, #[case] expected: ReportFormat) {
    assert_eq!(input.parse::<ReportFormat>().unwrap(), expected);
}
