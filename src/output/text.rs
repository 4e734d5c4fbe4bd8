use std::fmt::Write;

use crate::error::Result;
use crate::report::{HistoryReport, StatusReport};
use crate::stats::{DayStatus, WeekdayEntry, WeekdayStatus};
use crate::tracker::{ProgressLevel, Reconciliation, format_day_string};
use crate::units::Unit;

use super::{ReportFormatter, ansi};

const BAR_WIDTH: u32 = 20;
const WEEK_HEADER: &str = "Sun Mon Tue Wed Thu Fri Sat";

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn level_color(level: ProgressLevel) -> &'static str {
        match level {
            ProgressLevel::Complete => ansi::GREEN,
            ProgressLevel::Warning => ansi::YELLOW,
            ProgressLevel::Normal => ansi::CYAN,
        }
    }

    const fn weekday_symbol(status: WeekdayStatus) -> (&'static str, &'static str) {
        match status {
            WeekdayStatus::Today => ("●", ansi::CYAN),
            WeekdayStatus::Future => ("·", ansi::DIM),
            WeekdayStatus::Completed => ("✓", ansi::GREEN),
            WeekdayStatus::NotMet => ("✗", ansi::RED),
            WeekdayStatus::NoData => ("-", ansi::DIM),
        }
    }

    const fn day_label(status: DayStatus) -> (&'static str, &'static str) {
        match status {
            DayStatus::Met => ("✓ met", ansi::GREEN),
            DayStatus::NotMet => ("✗ not met", ansi::RED),
            DayStatus::Future => ("·", ansi::DIM),
            DayStatus::NoData => ("- no data", ansi::DIM),
        }
    }

    fn progress_bar(&self, percentage: u32, level: ProgressLevel) -> String {
        let filled = (percentage.min(100) * BAR_WIDTH / 100) as usize;
        let empty = BAR_WIDTH as usize - filled;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(empty));
        format!("[{}]", self.paint(&bar, Self::level_color(level)))
    }

    fn write_week(&self, output: &mut String, week: &[WeekdayEntry]) {
        let _ = writeln!(output, "  {WEEK_HEADER}");
        let cells: Vec<String> = week
            .iter()
            .map(|entry| {
                let (symbol, color) = Self::weekday_symbol(entry.status);
                format!(" {} ", self.paint(symbol, color))
            })
            .collect();
        let _ = writeln!(output, "  {}", cells.join(" "));
    }

    fn write_rollover(output: &mut String, rollover: Option<Reconciliation>, unit: Unit) {
        if let Some(Reconciliation::RolledOver {
            finalized,
            skipped_days,
        }) = rollover
        {
            let amount = crate::units::from_ml(f64::from(finalized.total_amount), unit);
            let outcome = if finalized.goal_met {
                "goal met"
            } else {
                "goal not met"
            };
            let _ = writeln!(
                output,
                "Closed {}: {amount} {unit} ({outcome})",
                format_day_string(finalized.date)
            );
            if skipped_days > 0 {
                let _ = writeln!(output, "No data for the {skipped_days} day(s) after that.");
            }
            output.push('\n');
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl ReportFormatter for TextFormatter {
    fn format_status(&self, report: &StatusReport) -> Result<String> {
        let mut output = String::new();
        let unit = report.unit;

        Self::write_rollover(&mut output, report.rollover, unit);

        let _ = writeln!(output, "{}", format_day_string(report.date));
        let percent = self.paint(
            &format!("{}%", report.progress.percentage),
            Self::level_color(report.progress.level),
        );
        let _ = writeln!(
            output,
            "Today: {} / {} {unit} ({percent})",
            report.consumed, report.goal
        );
        let _ = writeln!(
            output,
            "{}",
            self.progress_bar(report.progress.percentage, report.progress.level)
        );
        if report.progress.level == ProgressLevel::Complete {
            let _ = writeln!(output, "{}", self.paint("Goal reached!", ansi::GREEN));
        } else {
            let _ = writeln!(output, "Remaining: {} {unit}", report.remaining);
        }

        let _ = writeln!(output, "Drinks: {}", report.drink_count);
        for drink in &report.drinks {
            let _ = writeln!(output, "  {}  {} {unit}", drink.time, drink.amount);
        }

        output.push_str("\nThis week\n");
        self.write_week(&mut output, &report.week);
        let _ = writeln!(output, "Weekly average: {} {unit}", report.weekly_average);
        let _ = writeln!(output, "Goal completion (all time): {}%", report.completion_rate);

        Ok(output)
    }

    fn format_history(&self, report: &HistoryReport) -> Result<String> {
        let mut output = String::new();
        let unit = report.unit;
        let summary = &report.summary;

        let _ = writeln!(output, "{}", self.paint(&report.label, ansi::BOLD));
        let _ = writeln!(
            output,
            "Total: {} {unit}  Days logged: {}  Goal met: {}  Average: {} {unit}/day",
            summary.total_amount, summary.days_with_data, summary.completed_days, summary.average
        );
        output.push('\n');

        for day in &report.days {
            let (label, color) = Self::day_label(day.status);
            let _ = writeln!(
                output,
                "  {}  {:>6} {unit}  {}",
                day.date.format("%a %d"),
                day.amount,
                self.paint(label, color)
            );
        }

        output.push_str("\nWeek\n");
        self.write_week(&mut output, &report.week);
        let _ = writeln!(output, "Weekly average: {} {unit}", report.weekly_average);
        let _ = writeln!(output, "Goal completion (all time): {}%", report.completion_rate);

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
