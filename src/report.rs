//! Presentation-agnostic views of the tracker, already converted to the
//! user's display unit. Formatters only lay these out.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::settings::Settings;
use crate::stats::{DayStatus, StatsEngine, WeekdayEntry, shift_month};
use crate::tracker::{DayRecordStore, Progress, Reconciliation};
use crate::units::{Unit, from_ml};
use crate::{HydroError, Result};

/// Clock time format for today's drink list.
pub const DRINK_TIME_FORMAT: &str = "%H:%M";

fn display(amount_ml: u32, unit: Unit) -> i64 {
    from_ml(f64::from(amount_ml), unit)
}

fn display_f64(amount_ml: f64, unit: Unit) -> i64 {
    from_ml(amount_ml, unit)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkEntry {
    /// Local `HH:MM`.
    pub time: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub date: NaiveDate,
    pub unit: Unit,
    pub goal: i64,
    pub consumed: i64,
    pub remaining: i64,
    pub progress: Progress,
    pub drink_count: usize,
    /// Most recent first.
    pub drinks: Vec<DrinkEntry>,
    pub week: Vec<WeekdayEntry>,
    pub weekly_average: i64,
    pub completion_rate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollover: Option<Reconciliation>,
}

impl StatusReport {
    #[must_use]
    pub fn build(store: &DayRecordStore, settings: &Settings, stats: &StatsEngine<'_>) -> Self {
        let unit = settings.unit;
        let today = stats.today();
        let drinks = store
            .events_newest_first()
            .into_iter()
            .map(|event| DrinkEntry {
                time: event
                    .time
                    .with_timezone(&Local)
                    .format(DRINK_TIME_FORMAT)
                    .to_string(),
                amount: display(event.amount, unit),
            })
            .collect();

        Self {
            date: today,
            unit,
            goal: display(store.goal(), unit),
            consumed: display(store.consumed(), unit),
            remaining: display(store.goal().saturating_sub(store.consumed()), unit),
            progress: store.progress(),
            drink_count: stats.today_drink_frequency(),
            drinks,
            week: stats.weekly_completion(today),
            weekly_average: display_f64(stats.weekly_average(today), unit),
            completion_rate: stats.all_time_completion_rate(),
            rollover: None,
        }
    }

    /// Attach the day-boundary outcome when a previous day was finalized.
    #[must_use]
    pub fn with_rollover(mut self, reconciliation: Reconciliation) -> Self {
        if matches!(reconciliation, Reconciliation::RolledOver { .. }) {
            self.rollover = Some(reconciliation);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub total_amount: i64,
    pub days_with_data: u32,
    pub completed_days: u32,
    pub average: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub amount: i64,
    pub status: DayStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryReport {
    pub year: i32,
    pub month: u32,
    /// e.g. `January 2024`.
    pub label: String,
    pub offset: i32,
    pub unit: Unit,
    pub summary: MonthSummary,
    pub days: Vec<HistoryDay>,
    /// Week containing the viewed date.
    pub week: Vec<WeekdayEntry>,
    pub weekly_average: i64,
    pub completion_rate: u32,
}

impl HistoryReport {
    /// Month view `offset` months away from today.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the offset leaves the supported calendar range.
    pub fn build(stats: &StatsEngine<'_>, unit: Unit, offset: i32) -> Result<Self> {
        let anchor = shift_month(stats.today(), offset).ok_or_else(|| {
            HydroError::InvalidDate(format!("month offset {offset} is out of range"))
        })?;
        let (year, month) = (anchor.year(), anchor.month());

        let aggregate = stats.monthly_aggregate(year, month);
        let summary = MonthSummary {
            total_amount: display_total(aggregate.total_amount, unit),
            days_with_data: aggregate.days_with_data,
            completed_days: aggregate.completed_days,
            average: display_f64(aggregate.average, unit),
        };
        let days = stats
            .month_series(year, month)
            .into_iter()
            .map(|point| HistoryDay {
                date: point.date,
                amount: display(point.amount, unit),
                status: point.status,
            })
            .collect();

        Ok(Self {
            year,
            month,
            label: anchor.format("%B %Y").to_string(),
            offset,
            unit,
            summary,
            days,
            week: stats.weekly_completion(anchor),
            weekly_average: display_f64(stats.weekly_average(anchor), unit),
            completion_rate: stats.all_time_completion_rate(),
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn display_total(amount_ml: u64, unit: Unit) -> i64 {
    from_ml(amount_ml as f64, unit)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
