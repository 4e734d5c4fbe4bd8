use std::io::{self, BufRead, Write};

use crate::cli::{Cli, ResetArgs};
use crate::{EXIT_SUCCESS, HydroError, Result};

use super::context::{CommandContext, report_error};

#[must_use]
pub fn run_reset(args: &ResetArgs, cli: &Cli) -> i32 {
    match run_reset_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e, cli.color.into()),
    }
}

/// Clears today's drinks, or all history with `--all`.
///
/// # Errors
/// Returns `Aborted` if the prompt is declined, or a config/storage error.
pub fn run_reset_impl(args: &ResetArgs, cli: &Cli) -> Result<()> {
    let ctx = CommandContext::from_cli(cli)?;

    let question = if args.all {
        "Delete all history and today's intake?"
    } else {
        "Reset today's intake?"
    };
    if !args.yes && !confirm(question, &mut io::stdin().lock(), &mut io::stderr())? {
        return Err(HydroError::Aborted);
    }

    let mut session = ctx.open_session()?;
    let outcome = if args.all {
        session.clear_all()?
    } else {
        session.reset_today()?
    };

    ctx.confirm(
        outcome,
        if args.all {
            "All history was cleared."
        } else {
            "Today's intake was reset."
        },
    );
    Ok(())
}

/// Ask a yes/no question. Anything but `y`/`yes` (including EOF) means no.
///
/// # Errors
/// Returns an error if the prompt cannot be written or the answer read.
pub(crate) fn confirm<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    prompt: &mut W,
) -> Result<bool> {
    write!(prompt, "{question} [y/N] ")?;
    prompt.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
