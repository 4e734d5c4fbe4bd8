use crate::cli::{Cli, GoalAction, GoalArgs};
use crate::units::{self, Unit};
use crate::{EXIT_SUCCESS, Result};

use super::context::{CommandContext, report_error};

#[must_use]
pub fn run_goal(args: &GoalArgs, cli: &Cli) -> i32 {
    match run_goal_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e, cli.color.into()),
    }
}

/// Shows or changes the daily goal. Goals are always given in ml.
///
/// # Errors
/// Returns `InvalidGoal` if the new goal is out of range, or a
/// config/storage error.
pub fn run_goal_impl(args: &GoalArgs, cli: &Cli) -> Result<()> {
    let ctx = CommandContext::from_cli(cli)?;
    let mut session = ctx.open_session()?;

    let (label, (goal, outcome)) = match args.action {
        None | Some(GoalAction::Show) => {
            // Plain query: always printed, even with --quiet.
            let goal = session.tracker().goal();
            println!("{}", describe_goal("Daily goal", goal, session.settings().unit));
            return Ok(());
        }
        Some(GoalAction::Set { amount }) => ("Daily goal set to", session.set_goal(amount)?),
        Some(GoalAction::Up) => ("Daily goal raised to", session.increase_goal()?),
        Some(GoalAction::Down) => ("Daily goal lowered to", session.decrease_goal()?),
    };

    ctx.confirm(outcome, &describe_goal(label, goal, session.settings().unit));
    Ok(())
}

fn describe_goal(label: &str, goal_ml: u32, unit: Unit) -> String {
    match unit {
        Unit::Ml => format!("{label} {goal_ml} ml"),
        Unit::Oz => format!(
            "{label} {goal_ml} ml ({} oz)",
            units::from_ml(f64::from(goal_ml), Unit::Oz)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_goal_in_ml() {
        assert_eq!(describe_goal("Daily goal", 2000, Unit::Ml), "Daily goal 2000 ml");
    }

    #[test]
    fn describe_goal_adds_ounces() {
        assert_eq!(
            describe_goal("Daily goal set to", 2000, Unit::Oz),
            "Daily goal set to 2000 ml (68 oz)"
        );
    }
}
