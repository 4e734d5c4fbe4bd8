//! Load/save of opaque blobs by key.
//!
//! The tracker only ever reads a whole blob or writes a whole blob; what the
//! medium is (a directory of JSON files, or memory in tests) is up to the
//! [`KeyValueStore`] implementation.

mod file_store;
mod memory;
mod snapshot;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use snapshot::{
    SettingsData, TrackingData, decode_settings, decode_tracking, encode_settings,
    encode_tracking,
};

use crate::Result;
use crate::state::SaveOutcome;

/// Key of the day-data blob.
pub const TRACKING_KEY: &str = "waterTrackerData";

/// Key of the settings blob.
pub const SETTINGS_KEY: &str = "waterTrackerSettings";

/// Suffix for keys holding a copy of a blob that failed to parse.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

pub trait KeyValueStore {
    /// Read the blob stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    /// Returns an error if the medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the medium cannot be written.
    fn save(&self, key: &str, blob: &str) -> Result<SaveOutcome>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, blob: &str) -> Result<SaveOutcome> {
        (**self).save(key, blob)
    }
}
