use crate::cli::{Cli, StatusArgs};
use crate::report::StatusReport;
use crate::{EXIT_SUCCESS, Result};

use super::context::{CommandContext, report_error};

#[must_use]
pub fn run_status(args: &StatusArgs, cli: &Cli) -> i32 {
    match run_status_impl(args, cli) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => report_error(&e, cli.color.into()),
    }
}

/// Builds today's progress report, including this week's strip.
///
/// A day that was closed while opening the data is reported too.
///
/// # Errors
/// Returns an error if the data cannot be loaded or the report formatted.
pub fn run_status_impl(args: &StatusArgs, cli: &Cli) -> Result<String> {
    let ctx = CommandContext::from_cli(cli)?;
    let session = ctx.open_session()?;

    let stats = session.stats();
    let report = StatusReport::build(session.tracker(), session.settings(), &stats)
        .with_rollover(session.reconciliation());

    args.format.formatter(ctx.color).format_status(&report)
}
