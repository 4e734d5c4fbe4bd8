mod calendar;
mod engine;

pub use calendar::{days_in_month, month_bounds, shift_month, week_window};
pub use engine::{
    DayPoint, DayStatus, MonthlyAggregate, StatsEngine, WeekdayEntry, WeekdayStatus,
};
