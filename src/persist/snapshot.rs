//! JSON codecs for the two persisted blobs.
//!
//! Tracking data layout:
//! ```json
//! {
//!   "goal": 2000,
//!   "consumed": 1200,
//!   "todayIndividualDrinks": [{ "amount": 500, "time": "2024-01-01T08:00:00.000Z" }],
//!   "dailyRecords": [{ "date": "2024-01-01", "totalAmount": 1200, "goalMet": false }],
//!   "lastAccessDate": "Mon Jan 01 2024"
//! }
//! ```
//!
//! Missing fields take defaults and unknown fields are carried through
//! unchanged. Wrongly typed or out-of-range values fall back to their default
//! individually, and unreadable list entries are dropped on their own; only a
//! blob that is not a JSON object is reported as corrupt.

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::settings::{DEFAULT_GENDER, DEFAULT_WEIGHT_KG, Settings, Theme};
use crate::tracker::{
    DEFAULT_GOAL_ML, DayRecord, DayRecordStore, IntakeEvent, MAX_GOAL_ML, MIN_GOAL_ML,
    format_day_string, parse_day_string,
};
use crate::units::Unit;
use crate::{HydroError, Result};

use super::{SETTINGS_KEY, TRACKING_KEY};

/// Wire shape written for the tracking blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingData {
    pub goal: u32,
    pub consumed: u32,
    pub today_individual_drinks: Vec<IntakeEvent>,
    pub daily_records: Vec<DayRecord>,
    pub last_access_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape written for the settings blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsData {
    pub theme: String,
    pub unit: String,
    pub further_reminder: bool,
    pub gender: String,
    pub weight: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parse a blob into its top-level fields. Anything but a JSON object is corrupt.
fn object_fields(key: &str, blob: &str) -> Result<Map<String, Value>> {
    serde_json::from_str(blob).map_err(|source| HydroError::CorruptPersistedState {
        key: key.to_string(),
        source,
    })
}

/// Take `field` out of `fields`, treating an explicit `null` as absent.
fn take(fields: &mut Map<String, Value>, field: &str) -> Option<Value> {
    fields.remove(field).filter(|value| !value.is_null())
}

/// A non-negative whole number of ml, from a JSON number or a numeric string.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number >= 0.0 && number <= f64::from(u32::MAX))
        .then(|| number.round() as u32)
}

fn goal_from(value: Option<&Value>) -> u32 {
    let Some(value) = value else {
        return DEFAULT_GOAL_ML;
    };
    match whole_number(value) {
        Some(goal) if (MIN_GOAL_ML..=MAX_GOAL_ML).contains(&goal) => goal,
        _ => {
            warn!(%value, "stored goal is out of range, using the default");
            DEFAULT_GOAL_ML
        }
    }
}

fn consumed_from(value: Option<&Value>) -> u32 {
    value.map_or(0, |value| {
        whole_number(value).unwrap_or_else(|| {
            warn!(%value, "stored consumed amount is unusable, using 0");
            0
        })
    })
}

/// Decode every entry of a list field, dropping the ones that do not fit `T`.
fn entries<T: DeserializeOwned>(field: &str, value: Option<Value>) -> Vec<T> {
    let items = match value {
        None => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(field, value = %other, "stored list is not an array, ignoring it");
            return Vec::new();
        }
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(field, entry = %item, "dropping unreadable stored entry: {e}");
                None
            }
        })
        .collect()
}

fn last_access_from(value: Option<&Value>) -> Option<NaiveDate> {
    let value = value?;
    let parsed = value.as_str().and_then(parse_day_string);
    let blank = value.as_str().is_some_and(|text| text.trim().is_empty());
    if parsed.is_none() && !blank {
        warn!(%value, "unrecognised last access date, treating as first run");
    }
    parsed
}

/// Decode the tracking blob into a store plus any unknown fields.
///
/// `None` (nothing stored yet) yields a default store. Each field falls back
/// to its default on its own, and unreadable drinks or day records are
/// dropped one at a time.
///
/// # Errors
/// Returns `CorruptPersistedState` if the blob is not a JSON object.
pub fn decode_tracking(blob: Option<&str>) -> Result<(DayRecordStore, Map<String, Value>)> {
    let Some(blob) = blob else {
        return Ok((DayRecordStore::default(), Map::new()));
    };
    let mut fields = object_fields(TRACKING_KEY, blob)?;

    let goal = goal_from(take(&mut fields, "goal").as_ref());
    let consumed = consumed_from(take(&mut fields, "consumed").as_ref());
    let events: Vec<IntakeEvent> = entries(
        "todayIndividualDrinks",
        take(&mut fields, "todayIndividualDrinks"),
    );
    let records: Vec<DayRecord> = entries("dailyRecords", take(&mut fields, "dailyRecords"));
    let last_access = last_access_from(take(&mut fields, "lastAccessDate").as_ref());

    let store = DayRecordStore::from_parts(goal, consumed, events, records, last_access);
    Ok((store, fields))
}

/// # Errors
/// Returns an error if serialization fails.
pub fn encode_tracking(store: &DayRecordStore, extra: &Map<String, Value>) -> Result<String> {
    let data = TrackingData {
        goal: store.goal(),
        consumed: store.consumed(),
        today_individual_drinks: store.events().to_vec(),
        daily_records: store.records().values().copied().collect(),
        last_access_date: store.last_access().map(format_day_string).unwrap_or_default(),
        extra: extra.clone(),
    };
    Ok(serde_json::to_string(&data)?)
}

fn text_field(fields: &mut Map<String, Value>, field: &str) -> Option<String> {
    match take(fields, field)? {
        Value::String(text) => Some(text),
        other => {
            warn!(field, value = %other, "stored setting is not text, using the default");
            None
        }
    }
}

fn field_or_default<T: std::str::FromStr + Default>(field: &str, value: Option<&str>) -> T {
    value.map_or_else(T::default, |raw| {
        raw.parse().unwrap_or_else(|_| {
            warn!(field, value = raw, "unrecognised stored setting, using the default");
            T::default()
        })
    })
}

fn weight_from(value: Option<&Value>) -> u32 {
    let Some(value) = value else {
        return DEFAULT_WEIGHT_KG;
    };
    match whole_number(value) {
        Some(weight) if weight >= 1 => weight,
        _ => {
            warn!(%value, "stored weight is unusable, using the default");
            DEFAULT_WEIGHT_KG
        }
    }
}

/// Decode the settings blob, defaulting missing or invalid fields.
///
/// # Errors
/// Returns `CorruptPersistedState` if the blob is not a JSON object.
pub fn decode_settings(blob: Option<&str>) -> Result<(Settings, Map<String, Value>)> {
    let Some(blob) = blob else {
        return Ok((Settings::default(), Map::new()));
    };
    let mut fields = object_fields(SETTINGS_KEY, blob)?;

    let reminder_enabled = match take(&mut fields, "furtherReminder") {
        None => false,
        Some(Value::Bool(enabled)) => enabled,
        Some(other) => {
            warn!(value = %other, "stored reminder flag is not a boolean, turning it off");
            false
        }
    };

    let settings = Settings {
        unit: field_or_default::<Unit>("unit", text_field(&mut fields, "unit").as_deref()),
        theme: field_or_default::<Theme>("theme", text_field(&mut fields, "theme").as_deref()),
        reminder_enabled,
        gender: text_field(&mut fields, "gender").unwrap_or_else(|| DEFAULT_GENDER.to_string()),
        weight_kg: weight_from(take(&mut fields, "weight").as_ref()),
    };
    Ok((settings, fields))
}

/// # Errors
/// Returns an error if serialization fails.
pub fn encode_settings(settings: &Settings, extra: &Map<String, Value>) -> Result<String> {
    let data = SettingsData {
        theme: settings.theme.to_string(),
        unit: settings.unit.to_string(),
        further_reminder: settings.reminder_enabled,
        gender: settings.gender.clone(),
        weight: settings.weight_kg,
        extra: extra.clone(),
    };
    Ok(serde_json::to_string(&data)?)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
