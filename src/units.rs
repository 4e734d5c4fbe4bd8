//! Conversion between the two supported measurement units.
//!
//! Milliliters are the base unit: everything is stored in ml and converted
//! only on the way out to the user (or on the way in, for amounts typed in oz).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{HydroError, Result};

/// 1 ml = 0.033814 US fluid ounces.
pub const ML_TO_OZ_FACTOR: f64 = 0.033_814;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Ml,
    Oz,
}

impl Unit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ml => "ml",
            Self::Oz => "oz",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ml" => Ok(Self::Ml),
            "oz" => Ok(Self::Oz),
            _ => Err(format!("Unknown unit: {s} (expected ml or oz)")),
        }
    }
}

/// Convert `amount` between units, rounding to the nearest whole number.
///
/// Identity conversions still round. Non-finite input yields 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // saturating float-to-int cast is intended
pub fn convert(amount: f64, from: Unit, to: Unit) -> i64 {
    let converted = match (from, to) {
        (Unit::Ml, Unit::Oz) => amount * ML_TO_OZ_FACTOR,
        (Unit::Oz, Unit::Ml) => amount / ML_TO_OZ_FACTOR,
        _ => amount,
    };
    converted.round() as i64
}

/// Convert a base-unit amount into the display unit.
#[must_use]
pub fn from_ml(amount_ml: f64, to: Unit) -> i64 {
    convert(amount_ml, Unit::Ml, to)
}

/// Parse an amount typed in `unit` and return it in milliliters.
///
/// The result is not rounded; range checks happen when the amount is logged.
///
/// # Errors
/// Returns `InvalidAmount` if the input is not a finite number.
pub fn parse_amount(input: &str, unit: Unit) -> Result<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .ok()
        .filter(|value: &f64| value.is_finite())
        .ok_or_else(|| HydroError::InvalidAmount(format!("'{input}' is not a number")))?;
    Ok(match unit {
        Unit::Ml => value,
        Unit::Oz => value / ML_TO_OZ_FACTOR,
    })
}

#[cfg(test)]
#[path = "units_tests.rs"]
mod tests;
