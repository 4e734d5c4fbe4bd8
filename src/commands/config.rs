use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME};
use crate::output::OutputFormat;
use crate::{EXIT_SUCCESS, HydroError, Result};

use super::context::{load_config, report_error};

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    match &args.action {
        ConfigAction::Validate { path } => run_config_validate(path.as_deref(), cli),
        ConfigAction::Show { format } => run_config_show(*format, cli),
    }
}

fn run_config_validate(path: Option<&Path>, cli: &Cli) -> i32 {
    let config_path = path.map_or_else(|| PathBuf::from(LOCAL_CONFIG_NAME), Path::to_path_buf);
    match run_config_validate_impl(&config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => report_error(&e, cli.color.into()),
    }
}

/// Validates a configuration file.
///
/// # Errors
/// Returns an error if the file doesn't exist, contains invalid TOML, or has semantic errors.
pub(crate) fn run_config_validate_impl(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        return Err(HydroError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    FileConfigLoader::new().load_from_path(config_path)?;
    Ok(())
}

fn run_config_show(format: OutputFormat, cli: &Cli) -> i32 {
    match run_config_show_impl(format, cli) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => report_error(&e, cli.color.into()),
    }
}

/// Shows the effective configuration.
///
/// # Errors
/// Returns an error if the configuration file cannot be loaded or serialization fails.
pub(crate) fn run_config_show_impl(format: OutputFormat, cli: &Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref(), cli.no_config)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            Ok(format!("{json}\n"))
        }
        OutputFormat::Text => Ok(format_config_text(&config)),
    }
}

#[must_use]
pub(crate) fn format_config_text(config: &Config) -> String {
    let mut output = String::new();

    output.push_str("=== Effective Configuration ===\n\n");

    if let Some(version) = &config.version {
        let _ = writeln!(output, "version = {version}");
    }
    match &config.data_dir {
        Some(dir) => {
            let _ = writeln!(output, "data_dir = {}", dir.display());
        }
        None => output.push_str("data_dir = (platform default)\n"),
    }

    output.push_str("\n[intake]\n");
    let _ = writeln!(output, "  default_amount = {}", config.intake.default_amount);

    output.push_str("\n[stats]\n");
    let _ = writeln!(output, "  missing_days = {}", config.stats.missing_days);

    output
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
