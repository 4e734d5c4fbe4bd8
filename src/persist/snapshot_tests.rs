use chrono::NaiveDate;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Tracking blob
// =============================================================================

#[test]
fn missing_tracking_blob_yields_defaults() {
    let (store, extra) = decode_tracking(None).unwrap();

    assert_eq!(store.goal(), 2000);
    assert_eq!(store.consumed(), 0);
    assert!(store.events().is_empty());
    assert!(store.records().is_empty());
    assert_eq!(store.last_access(), None);
    assert!(extra.is_empty());
}

#[test]
fn decodes_full_tracking_blob() {
    let blob = r#"{
        "goal": 2500,
        "consumed": 750,
        "todayIndividualDrinks": [
            {"amount": 250, "time": "2024-01-02T08:15:00.000Z"},
            {"amount": 500, "time": "2024-01-02T10:45:00.000Z"}
        ],
        "dailyRecords": [
            {"date": "2024-01-01", "totalAmount": 2600, "goalMet": true},
            {"date": "2024-01-02", "totalAmount": 750, "goalMet": false}
        ],
        "lastAccessDate": "Tue Jan 02 2024"
    }"#;

    let (store, _) = decode_tracking(Some(blob)).unwrap();

    assert_eq!(store.goal(), 2500);
    assert_eq!(store.consumed(), 750);
    assert_eq!(store.events().len(), 2);
    assert_eq!(store.records().len(), 2);
    assert!(store.record(date(2024, 1, 1)).unwrap().goal_met);
    assert_eq!(store.last_access(), Some(date(2024, 1, 2)));
}

#[test]
fn missing_fields_take_defaults() {
    let (store, _) = decode_tracking(Some(r#"{"consumed": 300}"#)).unwrap();

    assert_eq!(store.goal(), 2000);
    assert_eq!(store.consumed(), 300);
    assert!(store.records().is_empty());
    assert_eq!(store.last_access(), None);
}

#[test]
fn zero_or_tiny_goal_falls_back_to_default() {
    for blob in [r#"{"goal": 0}"#, r#"{"goal": 100}"#, r#"{"goal": -5}"#, r#"{"goal": null}"#] {
        let (store, _) = decode_tracking(Some(blob)).unwrap();
        assert_eq!(store.goal(), 2000, "{blob}");
    }
}

#[test]
fn fractional_numbers_are_rounded() {
    let (store, _) = decode_tracking(Some(r#"{"goal": 2250.4, "consumed": 99.6}"#)).unwrap();
    assert_eq!(store.goal(), 2250);
    assert_eq!(store.consumed(), 100);
}

#[test]
fn unparsable_access_date_is_treated_as_empty() {
    let (store, _) = decode_tracking(Some(r#"{"lastAccessDate": "Invalid Date"}"#)).unwrap();
    assert_eq!(store.last_access(), None);
}

#[test]
fn corrupt_tracking_blob_is_reported() {
    let err = decode_tracking(Some("{\"goal\": ")).unwrap_err();
    assert!(matches!(
        err,
        HydroError::CorruptPersistedState { ref key, .. } if key == "waterTrackerData"
    ));

    for blob in ["[1, 2]", "\"text\"", "null"] {
        let err = decode_tracking(Some(blob)).unwrap_err();
        assert!(matches!(err, HydroError::CorruptPersistedState { .. }), "{blob}");
    }
}

#[test]
fn record_missing_goal_met_is_dropped_alone() {
    let blob = r#"{
        "goal": 2000,
        "dailyRecords": [
            {"date": "2024-01-01", "totalAmount": 2100, "goalMet": true},
            {"date": "2024-01-02", "totalAmount": 1800},
            {"date": "2024-01-03", "totalAmount": -40, "goalMet": false},
            {"date": "2024-01-04", "totalAmount": 5000000000, "goalMet": true},
            "2024-01-05",
            {"date": "2024-01-06", "totalAmount": 900, "goalMet": false}
        ],
        "lastAccessDate": "Sat Jan 06 2024"
    }"#;

    let (store, _) = decode_tracking(Some(blob)).unwrap();

    assert_eq!(store.records().len(), 2);
    assert!(store.record(date(2024, 1, 1)).unwrap().goal_met);
    assert!(store.record(date(2024, 1, 2)).is_none());
    assert_eq!(store.record(date(2024, 1, 6)).unwrap().total_amount, 900);
    assert_eq!(store.last_access(), Some(date(2024, 1, 6)));
}

#[test]
fn wrongly_typed_fields_fall_back_individually() {
    let blob = r#"{
        "goal": "2500",
        "consumed": "lots",
        "todayIndividualDrinks": [
            {"amount": 250, "time": "2024-01-02T08:15:00.000Z"},
            {"amount": "a cup", "time": "2024-01-02T09:00:00.000Z"}
        ],
        "dailyRecords": [{"date": "2024-01-01", "totalAmount": 2600, "goalMet": true}],
        "lastAccessDate": 20240102
    }"#;

    let (store, _) = decode_tracking(Some(blob)).unwrap();

    assert_eq!(store.goal(), 2500);
    assert_eq!(store.consumed(), 0);
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.last_access(), None);
}

#[test]
fn non_numeric_or_huge_goal_falls_back_to_default() {
    for blob in [
        r#"{"goal": "plenty", "dailyRecords": []}"#,
        r#"{"goal": true}"#,
        r#"{"goal": 50000}"#,
    ] {
        let (store, _) = decode_tracking(Some(blob)).unwrap();
        assert_eq!(store.goal(), 2000, "{blob}");
    }
}

#[test]
fn non_array_lists_are_treated_as_empty() {
    let blob = r#"{"dailyRecords": "nope", "todayIndividualDrinks": 3, "consumed": 40}"#;

    let (store, _) = decode_tracking(Some(blob)).unwrap();

    assert!(store.records().is_empty());
    assert!(store.events().is_empty());
    assert_eq!(store.consumed(), 40);
}

#[test]
fn unknown_tracking_fields_survive_round_trip() {
    let blob = r#"{"goal": 2000, "streak": 4, "notes": {"a": 1}}"#;

    let (store, extra) = decode_tracking(Some(blob)).unwrap();
    let encoded = encode_tracking(&store, &extra).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(value["streak"], 4);
    assert_eq!(value["notes"]["a"], 1);
}

#[test]
fn encode_tracking_uses_wire_names() {
    let mut store = DayRecordStore::default();
    store.reconcile_day_boundary(date(2024, 1, 1));

    let encoded = encode_tracking(&store, &Map::new()).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(value["goal"], 2000);
    assert_eq!(value["consumed"], 0);
    assert!(value["todayIndividualDrinks"].as_array().unwrap().is_empty());
    assert!(value["dailyRecords"].as_array().unwrap().is_empty());
    assert_eq!(value["lastAccessDate"], "Mon Jan 01 2024");
}

#[test]
fn encoded_records_are_chronological() {
    let records = [
        DayRecord::evaluate(date(2024, 1, 3), 10, 2000),
        DayRecord::evaluate(date(2024, 1, 1), 10, 2000),
    ];
    let store = DayRecordStore::from_parts(2000, 0, vec![], records, None);

    let encoded = encode_tracking(&store, &Map::new()).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(value["dailyRecords"][0]["date"], "2024-01-01");
    assert_eq!(value["dailyRecords"][1]["date"], "2024-01-03");
}

#[test]
fn tracking_round_trip_preserves_store() {
    let records = [DayRecord::evaluate(date(2024, 1, 1), 2500, 2000)];
    let events = vec![IntakeEvent::new(
        300,
        "2024-01-02T09:00:00Z".parse().unwrap(),
    )];
    let store = DayRecordStore::from_parts(1750, 300, events, records, Some(date(2024, 1, 2)));

    let encoded = encode_tracking(&store, &Map::new()).unwrap();
    let (decoded, _) = decode_tracking(Some(&encoded)).unwrap();

    assert_eq!(decoded, store);
}

// =============================================================================
// Settings blob
// =============================================================================

#[test]
fn missing_settings_blob_yields_defaults() {
    let (settings, _) = decode_settings(None).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn settings_merge_over_defaults() {
    let (settings, _) = decode_settings(Some(r#"{"unit": "oz", "theme": "dark"}"#)).unwrap();

    assert_eq!(settings.unit, Unit::Oz);
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.weight_kg, 70);
    assert_eq!(settings.gender, "male");
    assert!(!settings.reminder_enabled);
}

#[test]
fn invalid_setting_values_fall_back_individually() {
    let blob = r#"{"unit": "cups", "theme": "neon", "weight": 0, "furtherReminder": true}"#;

    let (settings, _) = decode_settings(Some(blob)).unwrap();

    assert_eq!(settings.unit, Unit::Ml);
    assert_eq!(settings.theme, Theme::Light);
    assert_eq!(settings.weight_kg, 70);
    assert!(settings.reminder_enabled);
}

#[test]
fn wrongly_typed_settings_fall_back_individually() {
    let blob = r#"{
        "unit": 3,
        "theme": "dark",
        "furtherReminder": "yes",
        "gender": false,
        "weight": "82"
    }"#;

    let (settings, extra) = decode_settings(Some(blob)).unwrap();

    assert_eq!(settings.unit, Unit::Ml);
    assert_eq!(settings.theme, Theme::Dark);
    assert!(!settings.reminder_enabled);
    assert_eq!(settings.gender, "male");
    assert_eq!(settings.weight_kg, 82);
    assert!(extra.is_empty());
}

#[test]
fn corrupt_settings_blob_is_reported() {
    let err = decode_settings(Some("not json")).unwrap_err();
    assert!(matches!(
        err,
        HydroError::CorruptPersistedState { ref key, .. } if key == "waterTrackerSettings"
    ));
}

#[test]
fn settings_round_trip_with_unknown_fields() {
    let blob = r#"{"unit": "oz", "weight": 82, "gender": "female", "language": "de"}"#;

    let (settings, extra) = decode_settings(Some(blob)).unwrap();
    let encoded = encode_settings(&settings, &extra).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(value["unit"], "oz");
    assert_eq!(value["weight"], 82);
    assert_eq!(value["gender"], "female");
    assert_eq!(value["furtherReminder"], false);
    assert_eq!(value["theme"], "light");
    assert_eq!(value["language"], "de");
}
