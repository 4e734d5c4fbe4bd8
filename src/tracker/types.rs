use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Smallest daily goal a user may set.
pub const MIN_GOAL_ML: u32 = 250;

/// Largest daily goal a user may set.
pub const MAX_GOAL_ML: u32 = 20_000;

/// Goal used when nothing (or nothing usable) has been stored.
pub const DEFAULT_GOAL_ML: u32 = 2000;

/// Increment applied by the goal up/down shortcuts.
pub const GOAL_STEP_ML: u32 = 250;

/// Layout of the stored access date, e.g. `Mon Jan 01 2024`.
pub const DAY_STRING_FORMAT: &str = "%a %b %d %Y";

/// A single drink recorded during the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeEvent {
    /// Amount in milliliters.
    pub amount: u32,
    pub time: DateTime<Utc>,
}

impl IntakeEvent {
    #[must_use]
    pub const fn new(amount: u32, time: DateTime<Utc>) -> Self {
        Self { amount, time }
    }
}

/// Aggregate intake for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    pub total_amount: u32,
    pub goal_met: bool,
}

impl DayRecord {
    /// Build a record, deciding `goal_met` against `goal`.
    #[must_use]
    pub const fn evaluate(date: NaiveDate, total_amount: u32, goal: u32) -> Self {
        Self {
            date,
            total_amount,
            goal_met: total_amount >= goal,
        }
    }
}

/// Coarse progress band used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressLevel {
    Normal,
    Warning,
    Complete,
}

/// Today's progress toward the goal, capped at 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub percentage: u32,
    pub level: ProgressLevel,
}

impl Progress {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn compute(consumed: u32, goal: u32) -> Self {
        let percentage = if goal == 0 {
            100
        } else {
            let raw = (f64::from(consumed) / f64::from(goal) * 100.0).round();
            raw.min(100.0) as u32
        };
        let level = match percentage {
            100.. => ProgressLevel::Complete,
            75..=99 => ProgressLevel::Warning,
            _ => ProgressLevel::Normal,
        };
        Self { percentage, level }
    }
}

#[must_use]
pub fn format_day_string(date: NaiveDate) -> String {
    date.format(DAY_STRING_FORMAT).to_string()
}

/// Parse a stored access date.
///
/// Accepts the day-string layout as well as `YYYY-MM-DD`. Empty or
/// unrecognised input yields `None`.
#[must_use]
pub fn parse_day_string(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, DAY_STRING_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .ok()
}
