//! The tracker's single owner of state.
//!
//! A [`Session`] loads both blobs, reconciles the day boundary, and writes
//! back after every mutation, so the stored state is never older than the
//! last completed operation.

use chrono::{DateTime, Local, NaiveDate};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::MissingDayPolicy;
use crate::persist::{
    CORRUPT_SUFFIX, KeyValueStore, SETTINGS_KEY, TRACKING_KEY, decode_settings, decode_tracking,
    encode_settings, encode_tracking,
};
use crate::settings::{Settings, Theme};
use crate::state::SaveOutcome;
use crate::stats::StatsEngine;
use crate::tracker::{DayRecord, DayRecordStore, Reconciliation};
use crate::units::{self, Unit};
use crate::{HydroError, Result};

pub struct Session<S: KeyValueStore, C: Clock> {
    kv: S,
    clock: C,
    tracker: DayRecordStore,
    settings: Settings,
    tracking_extra: Map<String, Value>,
    settings_extra: Map<String, Value>,
    policy: MissingDayPolicy,
    reconciliation: Reconciliation,
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    /// Load state from `kv`, apply any pending day rollover, and persist the result.
    ///
    /// Missing or corrupt blobs start from defaults; a corrupt blob is copied
    /// to `<key>.corrupt` first so nothing is silently lost.
    ///
    /// # Errors
    /// Returns an error only if the store itself cannot be read or written.
    pub fn open(kv: S, clock: C, policy: MissingDayPolicy) -> Result<Self> {
        let tracking_blob = kv.load(TRACKING_KEY)?;
        let (mut tracker, tracking_extra) =
            recover(&kv, TRACKING_KEY, tracking_blob.as_deref(), decode_tracking)?;

        let settings_blob = kv.load(SETTINGS_KEY)?;
        let (settings, settings_extra) =
            recover(&kv, SETTINGS_KEY, settings_blob.as_deref(), decode_settings)?;

        let today = clock.today();
        let reconciliation = tracker.reconcile_day_boundary(today);

        let session = Self {
            kv,
            clock,
            tracker,
            settings,
            tracking_extra,
            settings_extra,
            policy,
            reconciliation,
        };
        session.save_tracking()?;
        session.save_settings()?;
        Ok(session)
    }

    #[must_use]
    pub const fn tracker(&self) -> &DayRecordStore {
        &self.tracker
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// What happened at the day boundary when the session was opened.
    #[must_use]
    pub const fn reconciliation(&self) -> Reconciliation {
        self.reconciliation
    }

    #[must_use]
    pub const fn policy(&self) -> MissingDayPolicy {
        self.policy
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.kv
    }

    #[must_use]
    pub fn stats(&self) -> StatsEngine<'_> {
        StatsEngine::new(&self.tracker, self.today(), self.policy)
    }

    /// Log a drink of `amount_ml` at the current time.
    ///
    /// The returned outcome tells whether the change reached the store.
    ///
    /// # Errors
    /// Returns `InvalidAmount` for amounts below 1 ml, or a storage error.
    pub fn add_intake(&mut self, amount_ml: f64) -> Result<(DayRecord, SaveOutcome)> {
        let today = self.sync_day();
        let record = self
            .tracker
            .add_intake(amount_ml, self.clock.now_utc(), today)?;
        let outcome = self.save_tracking()?;
        Ok((record, outcome))
    }

    /// Log a drink typed by the user in `unit`.
    ///
    /// # Errors
    /// Returns `InvalidAmount` if the input is not a usable amount.
    pub fn add_amount(&mut self, input: &str, unit: Unit) -> Result<(DayRecord, SaveOutcome)> {
        let amount_ml = units::parse_amount(input, unit)?;
        self.add_intake(amount_ml)
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn reset_today(&mut self) -> Result<SaveOutcome> {
        let today = self.sync_day();
        self.tracker.reset_today(today);
        info!(%today, "today's intake was reset");
        self.save_tracking()
    }

    /// Drop every stored day record as well as today's drinks.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn clear_all(&mut self) -> Result<SaveOutcome> {
        let today = self.sync_day();
        self.tracker.clear_all(today);
        info!("all history was cleared");
        self.save_tracking()
    }

    /// # Errors
    /// Returns `InvalidGoal` if `goal` is outside the allowed range, or a storage error.
    pub fn set_goal(&mut self, goal: i64) -> Result<(u32, SaveOutcome)> {
        let today = self.sync_day();
        self.tracker.set_goal(goal, today)?;
        let outcome = self.save_tracking()?;
        Ok((self.tracker.goal(), outcome))
    }

    /// # Errors
    /// Returns `InvalidGoal` if the goal would pass the maximum, or a storage error.
    pub fn increase_goal(&mut self) -> Result<(u32, SaveOutcome)> {
        let today = self.sync_day();
        let goal = self.tracker.increase_goal(today)?;
        let outcome = self.save_tracking()?;
        Ok((goal, outcome))
    }

    /// # Errors
    /// Returns `InvalidGoal` if the goal would drop below the minimum.
    pub fn decrease_goal(&mut self) -> Result<(u32, SaveOutcome)> {
        let today = self.sync_day();
        let goal = self.tracker.decrease_goal(today)?;
        let outcome = self.save_tracking()?;
        Ok((goal, outcome))
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn set_unit(&mut self, unit: Unit) -> Result<SaveOutcome> {
        self.settings.unit = unit;
        self.save_settings()
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn set_theme(&mut self, theme: Theme) -> Result<SaveOutcome> {
        self.settings.theme = theme;
        self.save_settings()
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn set_reminder(&mut self, enabled: bool) -> Result<SaveOutcome> {
        self.settings.reminder_enabled = enabled;
        self.save_settings()
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn set_gender(&mut self, gender: &str) -> Result<SaveOutcome> {
        self.settings.set_gender(gender);
        self.save_settings()
    }

    /// # Errors
    /// Returns `InvalidWeight` for weights below 1 kg, or a storage error.
    pub fn set_weight(&mut self, input: &str) -> Result<(u32, SaveOutcome)> {
        let weight = self.settings.set_weight(input)?;
        let outcome = self.save_settings()?;
        Ok((weight, outcome))
    }

    /// Roll over first if the calendar moved on since the last operation.
    fn sync_day(&mut self) -> NaiveDate {
        let today = self.clock.today();
        if self.tracker.last_access() != Some(today) {
            self.reconciliation = self.tracker.reconcile_day_boundary(today);
        }
        today
    }

    fn save_tracking(&self) -> Result<SaveOutcome> {
        let blob = encode_tracking(&self.tracker, &self.tracking_extra)?;
        save_blob(&self.kv, TRACKING_KEY, &blob)
    }

    fn save_settings(&self) -> Result<SaveOutcome> {
        let blob = encode_settings(&self.settings, &self.settings_extra)?;
        save_blob(&self.kv, SETTINGS_KEY, &blob)
    }
}

fn save_blob<S: KeyValueStore>(kv: &S, key: &str, blob: &str) -> Result<SaveOutcome> {
    let outcome = kv.save(key, blob)?;
    if outcome.is_skipped() {
        warn!(key, "state was not saved because the store is busy");
    } else {
        debug!(key, bytes = blob.len(), "state saved");
    }
    Ok(outcome)
}

/// Decode a blob, falling back to defaults (with a backup copy) if it is corrupt.
fn recover<S, T>(
    kv: &S,
    key: &str,
    blob: Option<&str>,
    decode: fn(Option<&str>) -> Result<(T, Map<String, Value>)>,
) -> Result<(T, Map<String, Value>)>
where
    S: KeyValueStore,
{
    match decode(blob) {
        Err(HydroError::CorruptPersistedState { key: _, source }) => {
            let backup_key = format!("{key}{CORRUPT_SUFFIX}");
            warn!(
                key,
                backup = %backup_key,
                error = %source,
                "stored data is corrupt, starting from defaults"
            );
            if let Some(raw) = blob {
                kv.save(&backup_key, raw)?;
            }
            decode(None)
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
