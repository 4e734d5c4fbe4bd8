//! Tests for TOML parsing and semantic validation of config files.

use std::path::{Path, PathBuf};

use crate::config::{ConfigLoader, FileConfigLoader, MissingDayPolicy};
use crate::error::HydroError;

use super::mock_fs::MockFileSystem;

fn load(content: &str) -> crate::Result<crate::config::Config> {
    let fs = MockFileSystem::new().with_file("/config.toml", content);
    FileConfigLoader::with_fs(fs).load_from_path(Path::new("/config.toml"))
}

#[test]
fn parses_full_config() {
    let config = load(
        r#"
version = "1"
data_dir = "/var/lib/hydro"

[intake]
default_amount = 500

[stats]
missing_days = "neutral"
"#,
    )
    .unwrap();

    assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/hydro")));
    assert_eq!(config.intake.default_amount, 500);
    assert_eq!(config.stats.missing_days, MissingDayPolicy::Neutral);
}

#[test]
fn empty_file_yields_defaults() {
    let config = load("").unwrap();

    assert!(config.data_dir.is_none());
    assert_eq!(config.intake.default_amount, 250);
}

#[test]
fn syntax_error_is_toml_parse_error() {
    let err = load("[intake\ndefault_amount = 1").unwrap_err();
    assert!(matches!(err, HydroError::TomlParse(_)));
}

#[test]
fn wrong_type_is_toml_parse_error() {
    let err = load("[intake]\ndefault_amount = \"lots\"\n").unwrap_err();
    assert!(matches!(err, HydroError::TomlParse(_)));
}

#[test]
fn zero_default_amount_is_rejected() {
    let err = load("[intake]\ndefault_amount = 0\n").unwrap_err();

    assert!(matches!(err, HydroError::Config(_)));
    assert!(err.to_string().contains("default_amount"));
}
