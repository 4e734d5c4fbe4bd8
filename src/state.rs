//! Data directory resolution, atomic writes and advisory file locks.
//!
//! Persisted blobs live in the platform data directory
//! (e.g. `~/.local/share/hydro-track/` on Linux) unless overridden by
//! `--data-dir` or the `data_dir` config key.

use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::{HydroError, Result};

const APPLICATION_NAME: &str = "hydro-track";

/// Default lock timeout in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Polling interval for lock acquisition in milliseconds.
const LOCK_POLL_INTERVAL_MS: u64 = 50;

/// Result of a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Another process held the lock past the timeout; nothing was written.
    Skipped,
}

impl SaveOutcome {
    #[must_use]
    pub const fn is_saved(self) -> bool {
        matches!(self, Self::Saved)
    }

    #[must_use]
    pub const fn is_skipped(self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Platform data directory for hydro-track, if the platform has one.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APPLICATION_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Pick the data directory: explicit override first, then config, then platform default.
///
/// # Errors
/// Returns a `Config` error if no override is given and the platform has no
/// data directory (e.g. no home directory).
pub fn resolve_data_dir(
    cli_override: Option<&Path>,
    config_override: Option<&Path>,
) -> Result<PathBuf> {
    cli_override
        .or(config_override)
        .map(Path::to_path_buf)
        .or_else(default_data_dir)
        .ok_or_else(|| {
            HydroError::Config(
                "could not determine a data directory; pass --data-dir".to_string(),
            )
        })
}

/// Ensure the parent directory exists for a given path.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

// =============================================================================
// File Locking Utilities
// =============================================================================

/// Error type for lock acquisition failures.
#[derive(Debug)]
pub enum LockError {
    /// Lock acquisition timed out.
    Timeout,
    /// I/O error during lock operation.
    Io(io::Error),
}

impl From<io::Error> for LockError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "lock acquisition timed out"),
            Self::Io(e) => write!(f, "lock I/O error: {e}"),
        }
    }
}

impl std::error::Error for LockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timeout => None,
            Self::Io(e) => Some(e),
        }
    }
}

fn poll_lock(
    file: &File,
    timeout_ms: u64,
    try_lock: impl Fn(&File) -> std::result::Result<(), TryLockError>,
) -> std::result::Result<(), LockError> {
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll_interval = Duration::from_millis(LOCK_POLL_INTERVAL_MS);

    loop {
        match try_lock(file) {
            Ok(()) => return Ok(()),
            Err(TryLockError::WouldBlock) => {
                if start.elapsed() >= timeout {
                    return Err(LockError::Timeout);
                }
                thread::sleep(poll_interval);
            }
            Err(TryLockError::Error(e)) => return Err(LockError::Io(e)),
        }
    }
}

/// Try to acquire an exclusive (write) lock on the file with timeout.
///
/// # Errors
/// - `LockError::Timeout` if lock cannot be acquired within `timeout_ms`
/// - `LockError::Io` for other I/O errors
pub fn try_lock_exclusive_with_timeout(
    file: &File,
    timeout_ms: u64,
) -> std::result::Result<(), LockError> {
    poll_lock(file, timeout_ms, File::try_lock)
}

/// Try to acquire a shared (read) lock on the file with timeout.
///
/// # Errors
/// - `LockError::Timeout` if lock cannot be acquired within `timeout_ms`
/// - `LockError::Io` for other I/O errors
pub fn try_lock_shared_with_timeout(
    file: &File,
    timeout_ms: u64,
) -> std::result::Result<(), LockError> {
    poll_lock(file, timeout_ms, File::try_lock_shared)
}

/// Unlock a file, releasing any held lock. Failures are ignored.
pub fn unlock_file(file: &File) {
    let _ = file.unlock();
}

/// Shared lock held for the duration of a read.
///
/// If the lock cannot be taken the read proceeds unlocked and a warning is
/// logged; a stale read is preferable to failing the command.
pub struct SharedLockGuard<'a> {
    file: Option<&'a File>,
}

impl<'a> SharedLockGuard<'a> {
    #[must_use]
    pub fn try_acquire(file: &'a File, timeout_ms: u64, label: &str, path: &Path) -> Self {
        match try_lock_shared_with_timeout(file, timeout_ms) {
            Ok(()) => Self { file: Some(file) },
            Err(e) => {
                warn!(path = %path.display(), "could not lock {label} for reading: {e}");
                Self { file: None }
            }
        }
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for SharedLockGuard<'_> {
    fn drop(&mut self) {
        if let Some(file) = self.file {
            unlock_file(file);
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map_or_else(|| "blob".into(), |name| name.to_string_lossy().into_owned());
    path.with_file_name(format!(".{file_name}.tmp"))
}

/// Write `contents` to `path` atomically.
///
/// The data goes to a temp file first; the target is then locked exclusively
/// and the temp file renamed over it. A lock timeout leaves the target
/// untouched and returns `SaveOutcome::Skipped`.
///
/// # Errors
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write_with_lock(path: &Path, contents: &[u8], label: &str) -> Result<SaveOutcome> {
    atomic_write_with_lock_timeout(path, contents, label, DEFAULT_LOCK_TIMEOUT_MS)
}

/// [`atomic_write_with_lock`] with an explicit lock timeout.
///
/// # Errors
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write_with_lock_timeout(
    path: &Path,
    contents: &[u8],
    label: &str,
    timeout_ms: u64,
) -> Result<SaveOutcome> {
    let file_access = |source: io::Error| HydroError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    ensure_parent_dir(path).map_err(file_access)?;

    let temp_path = temp_path_for(path);
    let mut temp = File::create(&temp_path).map_err(file_access)?;
    temp.write_all(contents).map_err(file_access)?;
    temp.sync_all().map_err(file_access)?;
    drop(temp);

    let target = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map_err(file_access)?;

    match try_lock_exclusive_with_timeout(&target, timeout_ms) {
        Ok(()) => {}
        Err(LockError::Timeout) => {
            warn!(path = %path.display(), "{label} is locked by another process, skipping save");
            let _ = fs::remove_file(&temp_path);
            return Ok(SaveOutcome::Skipped);
        }
        Err(LockError::Io(e)) => {
            let _ = fs::remove_file(&temp_path);
            return Err(file_access(e));
        }
    }

    let renamed = fs::rename(&temp_path, path);
    unlock_file(&target);
    renamed.map_err(file_access)?;

    debug!(path = %path.display(), bytes = contents.len(), "{label} saved");
    Ok(SaveOutcome::Saved)
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
