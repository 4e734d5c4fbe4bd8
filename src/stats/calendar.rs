//! Calendar arithmetic shared by the statistics views.

use chrono::{Datelike, Days, Months, NaiveDate};

/// The Sunday..Saturday window containing `anchor`.
#[must_use]
pub fn week_window(anchor: NaiveDate) -> Vec<NaiveDate> {
    let offset = u64::from(anchor.weekday().num_days_from_sunday());
    let start = anchor.checked_sub_days(Days::new(offset)).unwrap_or(anchor);
    start.iter_days().take(7).collect()
}

/// First and last day of a calendar month, or `None` for an invalid month.
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

/// Number of days in the month, 0 for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    month_bounds(year, month).map_or(0, |(_, last)| last.day())
}

/// Move `date` by `offset` calendar months.
///
/// The day of month is clamped to the target month's length, so Jan 31 + 1
/// is the last day of February rather than a day in March.
#[must_use]
pub fn shift_month(date: NaiveDate, offset: i32) -> Option<NaiveDate> {
    let months = Months::new(offset.unsigned_abs());
    if offset >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_window_starts_on_sunday() {
        // Wed Jan 03 2024
        let window = week_window(date(2024, 1, 3));

        assert_eq!(window.len(), 7);
        assert_eq!(window[0], date(2023, 12, 31));
        assert_eq!(window[0].weekday(), Weekday::Sun);
        assert_eq!(window[6], date(2024, 1, 6));
        assert_eq!(window[6].weekday(), Weekday::Sat);
    }

    #[test]
    fn week_window_on_sunday_and_saturday() {
        assert_eq!(week_window(date(2024, 1, 7))[0], date(2024, 1, 7));
        assert_eq!(week_window(date(2024, 1, 13))[0], date(2024, 1, 7));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn shift_month_clamps_to_month_end() {
        assert_eq!(shift_month(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
        assert_eq!(shift_month(date(2024, 3, 31), -1), Some(date(2024, 2, 29)));
        assert_eq!(shift_month(date(2024, 5, 15), 0), Some(date(2024, 5, 15)));
    }

    #[test]
    fn shift_month_crosses_years() {
        assert_eq!(shift_month(date(2024, 1, 10), -1), Some(date(2023, 12, 10)));
        assert_eq!(shift_month(date(2023, 12, 10), 13), Some(date(2025, 1, 10)));
    }
}
