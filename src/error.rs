use std::path::PathBuf;

use thiserror::Error;

use crate::tracker::{MAX_GOAL_ML, MIN_GOAL_ML};

#[derive(Error, Debug)]
pub enum HydroError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid goal: {0} ml ({limit})", limit = goal_limit(.0))]
    InvalidGoal(i64),

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Persisted state under '{key}' is corrupt")]
    CorruptPersistedState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to access file: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Operation cancelled")]
    Aborted,
}

impl HydroError {
    /// Short category label used as the heading of printed errors.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "InvalidAmount",
            Self::InvalidGoal(_) => "InvalidGoal",
            Self::InvalidWeight(_) => "InvalidWeight",
            Self::InvalidDate(_) => "InvalidDate",
            Self::CorruptPersistedState { .. } => "CorruptState",
            Self::Config(_) | Self::TomlParse(_) => "Config",
            Self::FileAccess { .. } => "FileAccess",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "JSON",
            Self::Aborted => "Aborted",
        }
    }

    /// Human-readable message without the category prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidAmount(msg)
            | Self::InvalidWeight(msg)
            | Self::InvalidDate(msg)
            | Self::Config(msg) => msg.clone(),
            Self::InvalidGoal(goal) if above_max_goal(*goal) => {
                format!("{goal} ml is above the maximum daily goal of {MAX_GOAL_ML} ml")
            }
            Self::InvalidGoal(goal) => {
                format!("{goal} ml is below the minimum daily goal of {MIN_GOAL_ML} ml")
            }
            Self::CorruptPersistedState { key, .. } => {
                format!("stored data under '{key}' could not be parsed")
            }
            Self::FileAccess { path, source } => format!("{}: {source}", path.display()),
            Self::Io(e) => e.to_string(),
            Self::TomlParse(e) => e.message().to_string(),
            Self::JsonSerialize(e) => e.to_string(),
            Self::Aborted => "no changes were made".to_string(),
        }
    }

    /// Additional context, when the underlying cause carries some.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::CorruptPersistedState { source, .. } => Some(source.to_string()),
            Self::TomlParse(e) => e.span().map(|span| format!("at bytes {}..{}", span.start, span.end)),
            _ => None,
        }
    }

    /// Actionable hint for the user.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidAmount(_) => Some("Please enter a valid amount greater than 0"),
            Self::InvalidGoal(goal) if above_max_goal(*goal) => {
                Some("Please enter a valid goal (maximum 20000 ml)")
            }
            Self::InvalidGoal(_) => Some("Please enter a valid goal (minimum 250 ml)"),
            Self::InvalidWeight(_) => Some("Please enter a valid weight of at least 1 kg"),
            Self::InvalidDate(_) => Some("Dates use the YYYY-MM-DD format, e.g. 2024-01-31"),
            Self::Config(_) | Self::TomlParse(_) => {
                Some("Run 'hydro-track config validate' to check your configuration")
            }
            Self::FileAccess { .. } => Some("Check that the data directory exists and is writable"),
            _ => None,
        }
    }

    /// Whether the error came from rejected user input rather than the environment.
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InvalidGoal(_)
                | Self::InvalidWeight(_)
                | Self::InvalidDate(_)
                | Self::Aborted
        )
    }
}

pub type Result<T> = std::result::Result<T, HydroError>;

#[allow(clippy::cast_lossless)]
const fn above_max_goal(goal: i64) -> bool {
    goal > MAX_GOAL_ML as i64
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn goal_limit(goal: &i64) -> String {
    if above_max_goal(*goal) {
        format!("maximum is {MAX_GOAL_ML} ml")
    } else {
        format!("minimum is {MIN_GOAL_ML} ml")
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
