//! User preferences, independent of day data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::Unit;
use crate::{HydroError, Result};

pub const DEFAULT_WEIGHT_KG: u32 = 70;
pub const DEFAULT_GENDER: &str = "male";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("Unknown theme: {s} (expected light or dark)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub unit: Unit,
    pub theme: Theme,
    pub reminder_enabled: bool,
    pub gender: String,
    pub weight_kg: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit: Unit::default(),
            theme: Theme::default(),
            reminder_enabled: false,
            gender: DEFAULT_GENDER.to_string(),
            weight_kg: DEFAULT_WEIGHT_KG,
        }
    }
}

impl Settings {
    /// Set the body weight from user input.
    ///
    /// # Errors
    /// Returns `InvalidWeight` if the input is not a whole number of at least 1.
    pub fn set_weight(&mut self, input: &str) -> Result<u32> {
        let weight = parse_weight(input)?;
        self.weight_kg = weight;
        Ok(weight)
    }

    pub fn set_gender(&mut self, gender: &str) {
        self.gender = gender.trim().to_string();
    }
}

/// # Errors
/// Returns `InvalidWeight` for non-numeric input or values below 1.
pub fn parse_weight(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| HydroError::InvalidWeight(format!("'{trimmed}' is not a whole number")))?;
    u32::try_from(value)
        .ok()
        .filter(|weight| *weight >= 1)
        .ok_or_else(|| HydroError::InvalidWeight(format!("{value} kg must be at least 1")))
}
