use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::output::{ColorMode, print_error, print_warning};
use crate::persist::FileStore;
use crate::session::Session;
use crate::state::{self, SaveOutcome};
use crate::{EXIT_CONFIG_ERROR, EXIT_INVALID_INPUT, HydroError, Result};

/// Session type used by every subcommand.
pub type CliSession = Session<FileStore, Box<dyn Clock>>;

/// Everything a subcommand needs before it touches stored data.
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub color: ColorMode,
    pub quiet: bool,
    today: Option<String>,
}

impl CommandContext {
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or no data
    /// directory can be determined.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = load_config(cli.config.as_deref(), cli.no_config)?;
        let data_dir = state::resolve_data_dir(cli.data_dir.as_deref(), config.data_dir.as_deref())?;
        tracing::debug!(data_dir = %data_dir.display(), "using data directory");
        Ok(Self {
            config,
            data_dir,
            color: cli.color.into(),
            quiet: cli.quiet,
            today: cli.today.clone(),
        })
    }

    /// Open the stored state, rolling the day over if needed.
    ///
    /// # Errors
    /// Returns `InvalidDate` for a bad `--today` value, or a storage error.
    pub fn open_session(&self) -> Result<CliSession> {
        let clock = select_clock(self.today.as_deref())?;
        Session::open(
            FileStore::new(&self.data_dir),
            clock,
            self.config.stats.missing_days,
        )
    }

    /// Print a confirmation line unless `--quiet` was given.
    pub fn say(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    /// Tell the user a write was dropped because the data was locked.
    pub fn warn_if_skipped(&self, outcome: SaveOutcome) {
        if outcome.is_skipped() {
            print_warning(
                "the change was not saved because another hydro-track process holds the data lock",
                Some("Try again in a moment"),
                self.color,
            );
        }
    }

    /// Confirm a change only if it reached the store.
    pub fn confirm(&self, outcome: SaveOutcome, message: &str) {
        if outcome.is_saved() {
            self.say(message);
        } else {
            self.warn_if_skipped(outcome);
        }
    }
}

/// Load configuration from `config_path`, or discover it unless `no_config` is set.
///
/// # Errors
/// Returns an error if the configuration file cannot be read, parsed or validated.
pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Pick the wall clock, or a pinned date when `--today` was given.
///
/// # Errors
/// Returns `InvalidDate` if `today` is not a `YYYY-MM-DD` date.
pub(crate) fn select_clock(today: Option<&str>) -> Result<Box<dyn Clock>> {
    match today {
        Some(date) => {
            let clock = FixedClock::parse(date)?;
            tracing::info!(today = %clock.today(), "using pinned date");
            Ok(Box::new(clock))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

#[must_use]
pub(crate) const fn exit_code_for(error: &HydroError) -> i32 {
    if error.is_user_input() {
        EXIT_INVALID_INPUT
    } else {
        EXIT_CONFIG_ERROR
    }
}

/// Print `error` to stderr and return the matching exit code.
pub(crate) fn report_error(error: &HydroError, color: ColorMode) -> i32 {
    print_error(error, color);
    exit_code_for(error)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
