//! Day-boundary detection and finalization.
//!
//! There is no scheduler: a new day is noticed lazily, the next time the data
//! is loaded, by comparing the stored access date with today's date. Only the
//! last accessed date is known, so only that day gets a finalized record.
//! Days skipped entirely keep no record at all.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::store::DayRecordStore;
use super::types::DayRecord;

/// What `reconcile_day_boundary` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Reconciliation {
    /// No access date was stored yet.
    FirstRun,
    /// Still the same day; the running total was re-derived from the events.
    SameDay,
    /// A boundary was crossed and the previous day was finalized.
    RolledOver {
        finalized: DayRecord,
        /// Calendar days between the finalized day and today that have no data.
        skipped_days: i64,
    },
}

impl DayRecordStore {
    /// Fold the previous day into a record if `today` differs from the last
    /// access date.
    ///
    /// Calling this again with the same `today` is a no-op apart from the
    /// consistency recomputation of today's total.
    pub fn reconcile_day_boundary(&mut self, today: NaiveDate) -> Reconciliation {
        let Some(previous) = self.last_access.filter(|previous| *previous != today) else {
            let first_run = self.last_access.is_none();
            self.consumed = self.events_total();
            self.last_access = Some(today);
            if first_run {
                info!(%today, "no previous access date, starting fresh");
                return Reconciliation::FirstRun;
            }
            return Reconciliation::SameDay;
        };

        if previous > today {
            warn!(%previous, %today, "last access date is in the future, finalizing it anyway");
        }

        let finalized = DayRecord::evaluate(previous, self.consumed, self.goal);
        self.records.insert(previous, finalized);

        self.consumed = 0;
        self.events.clear();
        self.last_access = Some(today);

        let skipped_days = (today - previous).num_days().saturating_sub(1).max(0);
        info!(
            date = %previous,
            total = finalized.total_amount,
            goal_met = finalized.goal_met,
            skipped_days,
            "new day detected, previous day finalized"
        );

        Reconciliation::RolledOver {
            finalized,
            skipped_days,
        }
    }
}

#[cfg(test)]
#[path = "rollover_tests.rs"]
mod tests;
