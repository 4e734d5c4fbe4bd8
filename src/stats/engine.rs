use chrono::NaiveDate;
use serde::Serialize;

use crate::config::MissingDayPolicy;
use crate::tracker::DayRecordStore;

use super::calendar::{month_bounds, week_window};

/// Status of one slot in the weekly completion strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekdayStatus {
    Today,
    Future,
    Completed,
    NotMet,
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayEntry {
    pub date: NaiveDate,
    pub status: WeekdayStatus,
}

/// Status of one day in a month series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayStatus {
    Met,
    NotMet,
    Future,
    NoData,
}

/// One point of a month chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    pub date: NaiveDate,
    /// Milliliters.
    pub amount: u32,
    pub status: DayStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAggregate {
    pub total_amount: u64,
    pub days_with_data: u32,
    pub completed_days: u32,
    pub average: f64,
}

/// Read-only statistics over a [`DayRecordStore`] as seen from `today`.
///
/// Every view consults the same [`MissingDayPolicy`] for past days without a
/// record, so weekly and monthly figures always agree with each other.
#[derive(Debug, Clone, Copy)]
pub struct StatsEngine<'a> {
    store: &'a DayRecordStore,
    today: NaiveDate,
    policy: MissingDayPolicy,
}

impl<'a> StatsEngine<'a> {
    #[must_use]
    pub const fn new(store: &'a DayRecordStore, today: NaiveDate, policy: MissingDayPolicy) -> Self {
        Self {
            store,
            today,
            policy,
        }
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub const fn policy(&self) -> MissingDayPolicy {
        self.policy
    }

    /// Per-day status for the Sunday..Saturday week containing `anchor`.
    #[must_use]
    pub fn weekly_completion(&self, anchor: NaiveDate) -> Vec<WeekdayEntry> {
        week_window(anchor)
            .into_iter()
            .map(|date| WeekdayEntry {
                date,
                status: self.weekday_status(date),
            })
            .collect()
    }

    fn weekday_status(&self, date: NaiveDate) -> WeekdayStatus {
        if date == self.today {
            return WeekdayStatus::Today;
        }
        if date > self.today {
            return WeekdayStatus::Future;
        }
        match self.store.record(date) {
            Some(record) if record.goal_met => WeekdayStatus::Completed,
            Some(_) => WeekdayStatus::NotMet,
            None => match self.policy {
                MissingDayPolicy::NotMet => WeekdayStatus::NotMet,
                MissingDayPolicy::Neutral => WeekdayStatus::NoData,
            },
        }
    }

    /// Average intake (ml) over the week containing `anchor`.
    ///
    /// Days with a record always count. Under [`MissingDayPolicy::NotMet`],
    /// days up to today without a record count as 0 ml; under `Neutral` they
    /// are left out. Returns 0 when no day qualifies.
    #[must_use]
    pub fn weekly_average(&self, anchor: NaiveDate) -> f64 {
        let (sum, count) = week_window(anchor)
            .into_iter()
            .filter_map(|date| match self.store.record(date) {
                Some(record) => Some(record.total_amount),
                None if date <= self.today && self.policy == MissingDayPolicy::NotMet => Some(0),
                None => None,
            })
            .fold((0_u64, 0_u32), |(sum, count), amount| {
                (sum + u64::from(amount), count + 1)
            });

        if count == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let sum = sum as f64;
            sum / f64::from(count)
        }
    }

    /// Totals over the records that fall in the given calendar month.
    #[must_use]
    pub fn monthly_aggregate(&self, year: i32, month: u32) -> MonthlyAggregate {
        let mut aggregate = MonthlyAggregate {
            total_amount: 0,
            days_with_data: 0,
            completed_days: 0,
            average: 0.0,
        };
        let Some((first, last)) = month_bounds(year, month) else {
            return aggregate;
        };

        for record in self.store.records().range(first..=last).map(|(_, r)| r) {
            aggregate.total_amount += u64::from(record.total_amount);
            aggregate.days_with_data += 1;
            if record.goal_met {
                aggregate.completed_days += 1;
            }
        }
        if aggregate.days_with_data > 0 {
            #[allow(clippy::cast_precision_loss)]
            let total = aggregate.total_amount as f64;
            aggregate.average = total / f64::from(aggregate.days_with_data);
        }
        aggregate
    }

    /// One point per calendar day of the month, for charting.
    ///
    /// Today's amount is the running total, other days use their record.
    #[must_use]
    pub fn month_series(&self, year: i32, month: u32) -> Vec<DayPoint> {
        let Some((first, last)) = month_bounds(year, month) else {
            return Vec::new();
        };

        first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| self.day_point(date))
            .collect()
    }

    fn day_point(&self, date: NaiveDate) -> DayPoint {
        if date == self.today {
            let amount = self.store.consumed();
            let status = if amount >= self.store.goal() {
                DayStatus::Met
            } else {
                DayStatus::NotMet
            };
            return DayPoint {
                date,
                amount,
                status,
            };
        }

        let record = self.store.record(date);
        let amount = record.map_or(0, |r| r.total_amount);
        let status = if date > self.today {
            DayStatus::Future
        } else {
            match record {
                Some(r) if r.goal_met => DayStatus::Met,
                Some(_) => DayStatus::NotMet,
                None => match self.policy {
                    MissingDayPolicy::NotMet => DayStatus::NotMet,
                    MissingDayPolicy::Neutral => DayStatus::NoData,
                },
            }
        };
        DayPoint {
            date,
            amount,
            status,
        }
    }

    /// Percentage of recorded days where the goal was met, rounded; 0 with no records.
    #[must_use]
    pub fn all_time_completion_rate(&self) -> u32 {
        let records = self.store.records();
        if records.is_empty() {
            return 0;
        }
        let met = records.values().filter(|r| r.goal_met).count();
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let rate = (met as f64 / records.len() as f64 * 100.0).round() as u32;
        rate
    }

    /// Number of drinks logged today.
    #[must_use]
    pub fn today_drink_frequency(&self) -> usize {
        self.store.events().len()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
