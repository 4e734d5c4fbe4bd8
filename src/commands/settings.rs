use std::fmt::Write;

use crate::cli::{Cli, SettingsAction, SettingsArgs};
use crate::output::OutputFormat;
use crate::settings::Settings;
use crate::{EXIT_SUCCESS, Result};

use super::context::{CommandContext, report_error};

#[must_use]
pub fn run_settings(args: &SettingsArgs, cli: &Cli) -> i32 {
    match run_settings_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e, cli.color.into()),
    }
}

/// Shows or changes user preferences.
///
/// # Errors
/// Returns `InvalidWeight` for a bad weight, or a config/storage error.
pub fn run_settings_impl(args: &SettingsArgs, cli: &Cli) -> Result<()> {
    let ctx = CommandContext::from_cli(cli)?;
    let mut session = ctx.open_session()?;

    let format = match &args.action {
        None => OutputFormat::Text,
        Some(SettingsAction::Show { format }) => *format,
        Some(SettingsAction::Unit { unit }) => {
            let outcome = session.set_unit(*unit)?;
            ctx.confirm(outcome, &format!("Display unit set to {unit}"));
            return Ok(());
        }
        Some(SettingsAction::Theme { theme }) => {
            let outcome = session.set_theme(*theme)?;
            ctx.confirm(outcome, &format!("Theme set to {theme}"));
            return Ok(());
        }
        Some(SettingsAction::Reminder { state }) => {
            let enabled = bool::from(*state);
            let outcome = session.set_reminder(enabled)?;
            ctx.confirm(outcome, &format!("Reminder turned {}", on_off(enabled)));
            return Ok(());
        }
        Some(SettingsAction::Gender { gender }) => {
            let outcome = session.set_gender(gender)?;
            ctx.confirm(outcome, &format!("Gender set to {}", session.settings().gender));
            return Ok(());
        }
        Some(SettingsAction::Weight { weight }) => {
            let (weight, outcome) = session.set_weight(weight)?;
            ctx.confirm(outcome, &format!("Weight set to {weight} kg"));
            return Ok(());
        }
    };

    print!("{}", format_settings(session.settings(), format)?);
    Ok(())
}

/// Render settings as `key = value` lines or pretty JSON.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub(crate) fn format_settings(settings: &Settings, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(settings)?;
            Ok(format!("{json}\n"))
        }
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "unit     = {}", settings.unit);
            let _ = writeln!(output, "theme    = {}", settings.theme);
            let _ = writeln!(output, "reminder = {}", on_off(settings.reminder_enabled));
            let _ = writeln!(output, "gender   = {}", settings.gender);
            let _ = writeln!(output, "weight   = {} kg", settings.weight_kg);
            Ok(output)
        }
    }
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
