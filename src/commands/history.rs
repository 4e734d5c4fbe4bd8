use crate::cli::{Cli, HistoryArgs};
use crate::report::HistoryReport;
use crate::{EXIT_SUCCESS, Result};

use super::context::{CommandContext, report_error};

#[must_use]
pub fn run_history(args: &HistoryArgs, cli: &Cli) -> i32 {
    match run_history_impl(args, cli) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => report_error(&e, cli.color.into()),
    }
}

/// Builds the month view `--offset` months away from the current month.
///
/// # Errors
/// Returns `InvalidDate` if the offset leaves the supported calendar range,
/// or a config/storage error.
pub fn run_history_impl(args: &HistoryArgs, cli: &Cli) -> Result<String> {
    let ctx = CommandContext::from_cli(cli)?;
    let session = ctx.open_session()?;

    let stats = session.stats();
    let report = HistoryReport::build(&stats, session.settings().unit, args.offset)?;

    args.format.formatter(ctx.color).format_history(&report)
}
