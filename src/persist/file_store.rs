use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::state::{self, DEFAULT_LOCK_TIMEOUT_MS, SaveOutcome, SharedLockGuard};
use crate::{HydroError, Result};

use super::KeyValueStore;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(HydroError::FileAccess { path, source }),
        };

        let _lock_guard =
            SharedLockGuard::try_acquire(&file, DEFAULT_LOCK_TIMEOUT_MS, key, &path);

        let mut blob = String::new();
        BufReader::new(&file)
            .read_to_string(&mut blob)
            .map_err(|source| HydroError::FileAccess {
                path: path.clone(),
                source,
            })?;
        Ok(Some(blob))
    }

    fn save(&self, key: &str, blob: &str) -> Result<SaveOutcome> {
        state::atomic_write_with_lock(&self.path_for(key), blob.as_bytes(), key)
    }
}
