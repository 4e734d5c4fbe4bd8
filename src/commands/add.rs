use crate::cli::{AddArgs, Cli};
use crate::tracker::Progress;
use crate::units;
use crate::{EXIT_SUCCESS, Result};

use super::context::{CommandContext, report_error};

#[must_use]
pub fn run_add(args: &AddArgs, cli: &Cli) -> i32 {
    match run_add_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e, cli.color.into()),
    }
}

/// Logs one drink.
///
/// Without an amount the configured default (in ml) is logged. An explicit
/// amount is read in `--unit`, falling back to the display unit.
///
/// # Errors
/// Returns `InvalidAmount` for unusable amounts, or a config/storage error.
pub fn run_add_impl(args: &AddArgs, cli: &Cli) -> Result<()> {
    let ctx = CommandContext::from_cli(cli)?;
    let mut session = ctx.open_session()?;

    let (record, outcome) = match &args.amount {
        Some(amount) => {
            let unit = args.unit.unwrap_or(session.settings().unit);
            session.add_amount(amount, unit)?
        }
        None => session.add_intake(f64::from(ctx.config.intake.default_amount))?,
    };
    if outcome.is_skipped() {
        ctx.warn_if_skipped(outcome);
        return Ok(());
    }

    let unit = session.settings().unit;
    let goal = session.tracker().goal();
    let added = session.tracker().events().last().map_or(0, |event| event.amount);
    let progress = Progress::compute(record.total_amount, goal);

    ctx.say(&format!(
        "Added {} {unit}. Today: {} / {} {unit} ({}%)",
        units::from_ml(f64::from(added), unit),
        units::from_ml(f64::from(record.total_amount), unit),
        units::from_ml(f64::from(goal), unit),
        progress.percentage,
    ));
    if record.goal_met && record.total_amount - added < goal {
        ctx.say("Goal reached!");
    }
    Ok(())
}
