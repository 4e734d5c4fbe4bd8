#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the hydro-track binary.
#[macro_export]
macro_rules! hydro_track {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("hydro-track"))
    };
}

pub const TRACKING_FILE: &str = "waterTrackerData.json";
pub const SETTINGS_FILE: &str = "waterTrackerSettings.json";

/// A temp working directory with its own data directory.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Writes a raw blob into the data directory.
    pub fn write_data(&self, file_name: &str, content: &str) {
        self.create_file(&format!("data/{file_name}"), content);
    }

    /// Reads and parses a blob from the data directory.
    pub fn read_data(&self, file_name: &str) -> serde_json::Value {
        let content =
            fs::read_to_string(self.data_dir().join(file_name)).expect("Failed to read blob");
        serde_json::from_str(&content).expect("Blob is not valid JSON")
    }

    /// Command wired to this fixture's data directory, with config lookup
    /// disabled and the date pinned to `today`.
    pub fn cmd_on(&self, today: &str) -> assert_cmd::Command {
        let mut cmd = hydro_track!();
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--no-config")
            .arg("--data-dir")
            .arg(self.data_dir())
            .arg("--today")
            .arg(today);
        cmd
    }
}
