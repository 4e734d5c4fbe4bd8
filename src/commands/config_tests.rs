use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::config::MissingDayPolicy;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hydro-track.toml");
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}

#[test]
fn validate_accepts_valid_file() {
    let (_dir, path) = write_config("version = \"1\"\n[intake]\ndefault_amount = 300\n");

    assert!(run_config_validate_impl(&path).is_ok());
}

#[test]
fn validate_reports_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.toml");

    match run_config_validate_impl(&path) {
        Err(HydroError::Config(msg)) => assert!(msg.contains("not found")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn validate_rejects_invalid_toml() {
    let (_dir, path) = write_config("[intake\ndefault_amount = 1\n");

    assert!(matches!(
        run_config_validate_impl(&path),
        Err(HydroError::TomlParse(_))
    ));
}

#[test]
fn validate_rejects_unknown_version() {
    let (_dir, path) = write_config("version = \"9\"\n");

    match run_config_validate_impl(&path) {
        Err(HydroError::Config(msg)) => assert!(msg.contains("Unsupported config version")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn validate_rejects_unknown_policy() {
    let (_dir, path) = write_config("[stats]\nmissing_days = \"ignore\"\n");

    assert!(run_config_validate_impl(&path).is_err());
}

#[test]
fn format_config_text_defaults() {
    let output = format_config_text(&Config::default());

    assert_eq!(
        output,
        "=== Effective Configuration ===\n\n\
         data_dir = (platform default)\n\n\
         [intake]\n  default_amount = 250\n\n\
         [stats]\n  missing_days = not-met\n"
    );
}

#[test]
fn format_config_text_includes_overrides() {
    let mut config = Config {
        version: Some("1".to_string()),
        data_dir: Some(PathBuf::from("/srv/water")),
        ..Config::default()
    };
    config.stats.missing_days = MissingDayPolicy::Neutral;

    let output = format_config_text(&config);

    assert!(output.contains("version = 1\n"));
    assert!(output.contains("data_dir = /srv/water\n"));
    assert!(output.contains("missing_days = neutral\n"));
}

#[test]
fn show_json_with_explicit_config() {
    let (_dir, path) = write_config("[intake]\ndefault_amount = 500\n");
    let cli = Cli::parse_from([
        "hydro-track",
        "--config",
        path.to_str().unwrap(),
        "config",
        "show",
    ]);

    let output = run_config_show_impl(OutputFormat::Json, &cli).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["intake"]["default_amount"], 500);
    assert_eq!(value["stats"]["missing_days"], "not-met");
}

#[test]
fn show_without_config_uses_defaults() {
    let cli = Cli::parse_from(["hydro-track", "--no-config", "config", "show"]);

    let output = run_config_show_impl(OutputFormat::Text, &cli).unwrap();

    assert!(output.contains("default_amount = 250"));
}
