//! Source of "now" for the tracker.
//!
//! Day boundaries follow the local calendar, so the clock hands out local
//! times. `FixedClock` pins the date (used by `--today` and by tests).

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{HydroError, Result};

pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        (**self).now_utc()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stuck on a given date. The time of day is taken from the wall
/// clock unless set explicitly.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
    time: Option<NaiveTime>,
}

impl FixedClock {
    #[must_use]
    pub const fn on(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    #[must_use]
    pub const fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// Parse a `YYYY-MM-DD` date for the `--today` override.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the input is not a valid calendar date.
    pub fn parse(input: &str) -> Result<Self> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map(Self::on)
            .map_err(|e| HydroError::InvalidDate(format!("'{input}': {e}")))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        let time = self.time.unwrap_or_else(|| Local::now().time());
        let naive = self.date.and_time(time);
        // Ambiguous or skipped local times (DST) fall back to the earliest valid instant.
        Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&naive))
    }

    fn today(&self) -> NaiveDate {
        self.date
    }
}
