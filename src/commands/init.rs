use std::fs;

use crate::cli::InitArgs;
use crate::output::ColorMode;
use crate::{EXIT_SUCCESS, HydroError, Result};

use super::context::report_error;

#[must_use]
pub fn run_init(args: &InitArgs, color: ColorMode) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e, color),
    }
}

/// Writes a commented configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(HydroError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template()).map_err(|source| {
        HydroError::FileAccess {
            path: output_path.clone(),
            source,
        }
    })?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# hydro-track configuration file
#
# Looked up as ./hydro-track.toml first, then config.toml in the user
# config directory. Pass --config <path> to use another file.

version = "1"

# Where the tracker keeps its data (default: the platform data directory,
# e.g. ~/.local/share/hydro-track on Linux). --data-dir overrides this.
# data_dir = "/path/to/hydro-track-data"

[intake]
# Amount in ml logged by `hydro-track add` without an amount (default: 250)
default_amount = 250

[stats]
# How past days without any record count in the weekly strip and averages:
#   "not-met" - as a missed goal, contributing 0 ml to averages (default)
#   "neutral" - as "no data", left out of averages
missing_days = "not-met"
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
