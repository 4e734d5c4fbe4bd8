use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::{HydroError, Result};

use super::types::{
    DEFAULT_GOAL_ML, DayRecord, GOAL_STEP_ML, IntakeEvent, MAX_GOAL_ML, MIN_GOAL_ML, Progress,
};

/// In-memory day data: today's drinks plus one aggregate record per date.
///
/// Records are keyed by date, so at most one exists per day and iteration is
/// chronological.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecordStore {
    pub(super) goal: u32,
    pub(super) consumed: u32,
    pub(super) events: Vec<IntakeEvent>,
    pub(super) records: BTreeMap<NaiveDate, DayRecord>,
    pub(super) last_access: Option<NaiveDate>,
}

impl Default for DayRecordStore {
    fn default() -> Self {
        Self::new(DEFAULT_GOAL_ML)
    }
}

impl DayRecordStore {
    #[must_use]
    pub const fn new(goal: u32) -> Self {
        Self {
            goal,
            consumed: 0,
            events: Vec::new(),
            records: BTreeMap::new(),
            last_access: None,
        }
    }

    /// Rebuild a store from persisted parts.
    ///
    /// If `records` contains the same date more than once, the last one wins.
    #[must_use]
    pub fn from_parts(
        goal: u32,
        consumed: u32,
        events: Vec<IntakeEvent>,
        records: impl IntoIterator<Item = DayRecord>,
        last_access: Option<NaiveDate>,
    ) -> Self {
        let mut by_date = BTreeMap::new();
        for record in records {
            if by_date.insert(record.date, record).is_some() {
                warn!(date = %record.date, "duplicate day record in stored data, keeping the last one");
            }
        }
        Self {
            goal,
            consumed,
            events,
            records: by_date,
            last_access,
        }
    }

    #[must_use]
    pub const fn goal(&self) -> u32 {
        self.goal
    }

    /// Amount consumed in the current day, in ml.
    #[must_use]
    pub const fn consumed(&self) -> u32 {
        self.consumed
    }

    #[must_use]
    pub fn events(&self) -> &[IntakeEvent] {
        &self.events
    }

    /// Today's drinks, most recent first.
    #[must_use]
    pub fn events_newest_first(&self) -> Vec<IntakeEvent> {
        let mut events = self.events.clone();
        events.sort_by(|a, b| b.time.cmp(&a.time));
        events
    }

    #[must_use]
    pub const fn records(&self) -> &BTreeMap<NaiveDate, DayRecord> {
        &self.records
    }

    #[must_use]
    pub fn record(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.records.get(&date)
    }

    #[must_use]
    pub const fn last_access(&self) -> Option<NaiveDate> {
        self.last_access
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::compute(self.consumed, self.goal)
    }

    /// Record a drink of `amount_ml` taken at `at` on `today`.
    ///
    /// # Errors
    /// Returns `InvalidAmount` if the amount is not a finite number of at
    /// least 1 ml. The store is left untouched in that case.
    pub fn add_intake(
        &mut self,
        amount_ml: f64,
        at: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<DayRecord> {
        let amount = validate_amount(amount_ml)?;

        self.events.push(IntakeEvent::new(amount, at));
        self.consumed = self.events_total();

        let record = DayRecord::evaluate(today, self.consumed, self.goal);
        self.records.insert(today, record);
        debug!(amount, total = self.consumed, %today, "intake added");
        Ok(record)
    }

    /// Discard today's drinks and today's record. Cannot be undone.
    pub fn reset_today(&mut self, today: NaiveDate) {
        self.consumed = 0;
        self.events.clear();
        self.records.remove(&today);
        self.last_access = Some(today);
    }

    /// Discard every record and today's drinks. The goal is kept.
    pub fn clear_all(&mut self, today: NaiveDate) {
        self.consumed = 0;
        self.events.clear();
        self.records.clear();
        self.last_access = Some(today);
    }

    /// Change the daily goal.
    ///
    /// Only today's record is re-evaluated; past records keep the outcome
    /// computed against the goal that applied on their day.
    ///
    /// # Errors
    /// Returns `InvalidGoal` if `new_goal` is outside
    /// [`MIN_GOAL_ML`]..=[`MAX_GOAL_ML`].
    pub fn set_goal(&mut self, new_goal: i64, today: NaiveDate) -> Result<()> {
        let goal = u32::try_from(new_goal)
            .ok()
            .filter(|goal| (MIN_GOAL_ML..=MAX_GOAL_ML).contains(goal))
            .ok_or(HydroError::InvalidGoal(new_goal))?;

        self.goal = goal;
        if let Some(record) = self.records.get_mut(&today) {
            record.goal_met = self.consumed >= goal;
        }
        Ok(())
    }

    /// Raise the goal by one step.
    ///
    /// # Errors
    /// Returns `InvalidGoal` if the goal would pass [`MAX_GOAL_ML`].
    pub fn increase_goal(&mut self, today: NaiveDate) -> Result<u32> {
        self.set_goal(i64::from(self.goal) + i64::from(GOAL_STEP_ML), today)?;
        Ok(self.goal)
    }

    /// Lower the goal by one step.
    ///
    /// # Errors
    /// Returns `InvalidGoal` if the goal would drop below the minimum.
    pub fn decrease_goal(&mut self, today: NaiveDate) -> Result<u32> {
        self.set_goal(i64::from(self.goal) - i64::from(GOAL_STEP_ML), today)?;
        Ok(self.goal)
    }

    pub(super) fn events_total(&self) -> u32 {
        self.events
            .iter()
            .fold(0_u32, |sum, event| sum.saturating_add(event.amount))
    }
}

/// Check a user-supplied amount and turn it into whole milliliters.
///
/// # Errors
/// Returns `InvalidAmount` for non-finite, non-positive, sub-milliliter or
/// out-of-range amounts.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn validate_amount(amount_ml: f64) -> Result<u32> {
    if !amount_ml.is_finite() {
        return Err(HydroError::InvalidAmount(format!(
            "{amount_ml} is not a number"
        )));
    }
    let rounded = amount_ml.round();
    if rounded < 1.0 {
        return Err(HydroError::InvalidAmount(format!(
            "{amount_ml} ml must be greater than 0"
        )));
    }
    if rounded > f64::from(u32::MAX) {
        return Err(HydroError::InvalidAmount(format!(
            "{amount_ml} ml is too large"
        )));
    }
    Ok(rounded as u32)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
