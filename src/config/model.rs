use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Default amount (ml) logged by `add` when no amount is given.
pub const DEFAULT_INTAKE_AMOUNT_ML: u32 = 250;

/// How a past day without any record counts in statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingDayPolicy {
    /// Count it as a day where the goal was not met (and 0 ml toward averages).
    #[default]
    NotMet,
    /// Report it as "no data" and leave it out of averages.
    Neutral,
}

impl fmt::Display for MissingDayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMet => f.write_str("not-met"),
            Self::Neutral => f.write_str("neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Amount in ml logged by `add` without an explicit amount.
    #[serde(default = "default_intake_amount")]
    pub default_amount: u32,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            default_amount: default_intake_amount(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub missing_days: MissingDayPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Directory holding the persisted JSON blobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub intake: IntakeConfig,

    #[serde(default)]
    pub stats: StatsConfig,
}

const fn default_intake_amount() -> u32 {
    DEFAULT_INTAKE_AMOUNT_ML
}
