//! Integration tests for `init`, `config` and configuration lookup.

mod common;

use common::{TRACKING_FILE, TestFixture};
use predicates::prelude::*;

// =============================================================================
// init
// =============================================================================

#[test]
fn init_creates_default_config_file() {
    let fixture = TestFixture::new();

    hydro_track!()
        .current_dir(fixture.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let content = std::fs::read_to_string(fixture.path().join("hydro-track.toml")).unwrap();
    assert!(content.contains("[intake]"));
    assert!(content.contains("missing_days"));
}

#[test]
fn init_fails_if_config_exists() {
    let fixture = TestFixture::new();
    fixture.create_file("hydro-track.toml", "# existing config\n");

    hydro_track!()
        .current_dir(fixture.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let fixture = TestFixture::new();
    fixture.create_file("hydro-track.toml", "# existing config\n");

    hydro_track!()
        .current_dir(fixture.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let content = std::fs::read_to_string(fixture.path().join("hydro-track.toml")).unwrap();
    assert!(content.contains("default_amount = 250"));
}

// =============================================================================
// config validate / show
// =============================================================================

#[test]
fn generated_config_validates() {
    let fixture = TestFixture::new();
    hydro_track!()
        .current_dir(fixture.path())
        .arg("init")
        .assert()
        .success();

    hydro_track!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Configuration is valid: hydro-track.toml",
        ));
}

#[test]
fn validate_missing_file_fails() {
    let fixture = TestFixture::new();

    hydro_track!()
        .current_dir(fixture.path())
        .args(["config", "validate", "missing.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn validate_reports_bad_values() {
    let fixture = TestFixture::new();
    fixture.create_file("bad.toml", "[intake]\ndefault_amount = 0\n");

    hydro_track!()
        .current_dir(fixture.path())
        .args(["config", "validate", "bad.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("default_amount"));
}

#[test]
fn show_json_reflects_file() {
    let fixture = TestFixture::new();
    fixture.create_file("custom.toml", "[stats]\nmissing_days = \"neutral\"\n");

    let output = hydro_track!()
        .current_dir(fixture.path())
        .args(["--config", "custom.toml", "config", "show", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stats"]["missing_days"], "neutral");
    assert_eq!(value["intake"]["default_amount"], 250);
}

#[test]
fn show_text_without_config() {
    let fixture = TestFixture::new();

    hydro_track!()
        .current_dir(fixture.path())
        .args(["--no-config", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Effective Configuration ==="))
        .stdout(predicate::str::contains("missing_days = not-met"));
}

// =============================================================================
// Config affects tracking
// =============================================================================

#[test]
fn local_config_sets_default_amount() {
    let fixture = TestFixture::new();
    fixture.create_file("hydro-track.toml", "[intake]\ndefault_amount = 400\n");

    hydro_track!()
        .current_dir(fixture.path())
        .arg("--data-dir")
        .arg(fixture.data_dir())
        .args(["--today", "2024-01-10", "add"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 400 ml."));
}

#[test]
fn config_data_dir_is_used() {
    let fixture = TestFixture::new();
    let data_dir = fixture.path().join("from-config");
    fixture.create_file(
        "custom.toml",
        &format!("data_dir = '{}'\n", data_dir.display()),
    );

    hydro_track!()
        .current_dir(fixture.path())
        .args(["--config", "custom.toml", "--today", "2024-01-10", "add", "100"])
        .assert()
        .success();

    assert!(data_dir.join(TRACKING_FILE).exists());
}

#[test]
fn invalid_config_stops_commands() {
    let fixture = TestFixture::new();
    fixture.create_file("hydro-track.toml", "version = \"7\"\n");

    hydro_track!()
        .current_dir(fixture.path())
        .arg("--data-dir")
        .arg(fixture.data_dir())
        .arg("status")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported config version"));

    assert!(!fixture.data_dir().exists());
}

#[test]
fn neutral_policy_leaves_gaps_out_of_the_week() {
    let fixture = TestFixture::new();
    fixture.create_file(
        "hydro-track.toml",
        "[stats]\nmissing_days = \"neutral\"\n",
    );
    let run = |today: &str, args: &[&str]| {
        hydro_track!()
            .current_dir(fixture.path())
            .arg("--data-dir")
            .arg(fixture.data_dir())
            .args(["--today", today])
            .args(args)
            .output()
            .unwrap()
    };

    assert!(run("2024-01-08", &["add", "2000"]).status.success());
    let output = run("2024-01-10", &["status", "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["week"][0]["status"], "no-data");
    assert_eq!(value["week"][1]["status"], "completed");
    assert_eq!(value["week"][2]["status"], "no-data");
    assert_eq!(value["weekly_average"], 2000);
}
