mod rollover;
mod store;
mod types;

pub use rollover::Reconciliation;
pub use store::{DayRecordStore, validate_amount};
pub use types::{
    DAY_STRING_FORMAT, DEFAULT_GOAL_ML, DayRecord, GOAL_STEP_ML, IntakeEvent, MAX_GOAL_ML,
    MIN_GOAL_ML, Progress, ProgressLevel, format_day_string, parse_day_string,
};
