use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::LOCAL_CONFIG_NAME;
use crate::output::{ColorMode, OutputFormat};
use crate::settings::Theme;
use crate::units::Unit;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// On/off switch for toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        toggle == Toggle::On
    }
}

#[derive(Parser, Debug)]
#[command(name = "hydro-track")]
#[command(author, version, about = "Daily water intake tracker")]
#[command(long_about = "Track daily water intake against a goal, with weekly and monthly statistics.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    1 - Invalid input (amount, goal, weight, date) or cancelled\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors and suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    /// Directory holding the tracker data (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_name = "DATE")]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a drink
    Add(AddArgs),

    /// Clear today's intake
    Reset(ResetArgs),

    /// Show today's progress and this week
    Status(StatusArgs),

    /// Show or change the daily goal
    Goal(GoalArgs),

    /// Show or change user settings
    Settings(SettingsArgs),

    /// Show a month of history
    History(HistoryArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Configuration file utilities
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount to log (default: intake.default_amount from config, in ml)
    pub amount: Option<String>,

    /// Unit of AMOUNT (default: the display unit from settings)
    #[arg(short, long, value_parser = parse_unit)]
    pub unit: Option<Unit>,
}

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Also delete every past day record
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct GoalArgs {
    #[command(subcommand)]
    pub action: Option<GoalAction>,
}

#[derive(Subcommand, Debug)]
pub enum GoalAction {
    /// Print the current goal
    Show,
    /// Set the goal in ml (250 to 20000)
    Set {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Raise the goal by 250 ml
    Up,
    /// Lower the goal by 250 ml
    Down,
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: Option<SettingsAction>,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print all settings
    Show {
        /// Output format [possible values: text, json]
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
    /// Set the display unit
    Unit {
        #[arg(value_parser = parse_unit)]
        unit: Unit,
    },
    /// Set the color theme
    Theme {
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
    /// Turn the drink reminder on or off
    Reminder {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Set gender
    Gender { gender: String },
    /// Set body weight in kg
    Weight {
        #[arg(allow_negative_numbers = true)]
        weight: String,
    },
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Months relative to the current one (-1 = last month)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i32,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = LOCAL_CONFIG_NAME)]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate configuration file syntax and values
    Validate {
        /// Path to configuration file (default: hydro-track.toml)
        path: Option<PathBuf>,
    },

    /// Display the effective configuration
    Show {
        /// Output format [possible values: text, json]
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

fn parse_unit(s: &str) -> Result<Unit, String> {
    s.parse()
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    s.parse()
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
