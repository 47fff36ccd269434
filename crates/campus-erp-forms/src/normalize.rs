//! Wire/edit value normalization for temporal fields.
//!
//! The backend speaks fixed-format strings (`YYYY-MM-DD`, `HH:mm:ss`,
//! `YYYY-MM-DD HH:mm:ss`) and represents a date range as a
//! `<field>Start`/`<field>End` key pair. The edit layer works with parsed
//! [`Value`] date types and a single composite range value. Conversion is
//! lossy-tolerant in both directions: unparseable wire input is left absent
//! on open, and unparseable edit values become null on submit — neither is
//! an error.
//!
//! Pending uploads never enter the date paths; [`Value::File`] is guarded
//! out before any formatting runs.

use std::collections::HashMap;

use campus_erp_core::value::Value;

use crate::fields::{FieldDef, FieldKind};

/// Wire format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format for times.
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Wire format for date-times.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wire key for the start of a range field.
pub fn range_start_key(field: &str) -> String {
    format!("{field}Start")
}

/// Wire key for the end of a range field.
pub fn range_end_key(field: &str) -> String {
    format!("{field}End")
}

fn parse_date(value: &Value) -> Option<chrono::NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::DateTime(dt) => Some(dt.date()),
        Value::String(s) => chrono::NaiveDate::parse_from_str(s, DATE_FORMAT)
            .ok()
            .or_else(|| {
                chrono::NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
                    .ok()
                    .map(|dt| dt.date())
            }),
        _ => None,
    }
}

fn parse_time(value: &Value) -> Option<chrono::NaiveTime> {
    match value {
        Value::Time(t) => Some(*t),
        Value::DateTime(dt) => Some(dt.time()),
        Value::String(s) => chrono::NaiveTime::parse_from_str(s, TIME_FORMAT)
            .ok()
            .or_else(|| chrono::NaiveTime::parse_from_str(s, "%H:%M").ok()),
        _ => None,
    }
}

fn parse_datetime(value: &Value) -> Option<chrono::NaiveDateTime> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::Date(d) => d.and_hms_opt(0, 0, 0),
        Value::String(s) => chrono::NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
            .ok()
            .or_else(|| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok())
            .or_else(|| {
                chrono::NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            }),
        _ => None,
    }
}

/// Converts a fetched wire record into edit-side form values.
///
/// Temporal strings parse into date values; a `<field>Start`/`<field>End`
/// pair folds into one [`Value::DateRange`] under the field's own name (the
/// split keys are dropped — submit regenerates them). Persisted file paths
/// become [`Value::FileRef`]. Values that fail to parse are left absent
/// rather than erroring, so a malformed record still opens.
pub fn wire_to_edit(
    fields: &[FieldDef],
    record: &HashMap<String, Value>,
) -> HashMap<String, Value> {
    let mut edit = record.clone();

    for field in fields {
        match field.kind {
            FieldKind::Date => {
                if let Some(value) = record.get(&field.name) {
                    match parse_date(value) {
                        Some(d) => {
                            edit.insert(field.name.clone(), Value::Date(d));
                        }
                        None => {
                            edit.remove(&field.name);
                        }
                    }
                }
            }
            FieldKind::Time => {
                if let Some(value) = record.get(&field.name) {
                    match parse_time(value) {
                        Some(t) => {
                            edit.insert(field.name.clone(), Value::Time(t));
                        }
                        None => {
                            edit.remove(&field.name);
                        }
                    }
                }
            }
            FieldKind::DateTime => {
                if let Some(value) = record.get(&field.name) {
                    match parse_datetime(value) {
                        Some(dt) => {
                            edit.insert(field.name.clone(), Value::DateTime(dt));
                        }
                        None => {
                            edit.remove(&field.name);
                        }
                    }
                }
            }
            FieldKind::DateRange => {
                let start_key = range_start_key(&field.name);
                let end_key = range_end_key(&field.name);
                let start = record.get(&start_key).and_then(parse_date);
                let end = record.get(&end_key).and_then(parse_date);
                if let (Some(start), Some(end)) = (start, end) {
                    edit.insert(field.name.clone(), Value::DateRange(start, end));
                }
                edit.remove(&start_key);
                edit.remove(&end_key);
            }
            FieldKind::File => {
                if let Some(Value::String(s)) = record.get(&field.name) {
                    if s.starts_with("http") || s.starts_with('/') {
                        edit.insert(field.name.clone(), Value::FileRef(s.clone()));
                    }
                }
            }
            _ => {}
        }
    }

    edit
}

/// Converts edit-side form values into their wire representation.
///
/// Date kinds render to their fixed formats; a [`Value::DateRange`] expands
/// to the Start/End key pair and the composite key is removed. A temporal
/// field whose value cannot be read as a date becomes `Null`. Pending
/// uploads pass through untouched — they must never hit the date formatter.
pub fn edit_to_wire(
    fields: &[FieldDef],
    values: &HashMap<String, Value>,
) -> HashMap<String, Value> {
    let mut wire = values.clone();

    for field in fields {
        let Some(value) = values.get(&field.name) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        // Binary payloads corrupt if stringified as dates; skip them
        // before any temporal handling.
        if value.is_file() {
            continue;
        }

        match field.kind {
            FieldKind::Date => {
                let formatted = parse_date(value)
                    .map_or(Value::Null, |d| {
                        Value::String(d.format(DATE_FORMAT).to_string())
                    });
                wire.insert(field.name.clone(), formatted);
            }
            FieldKind::Time => {
                let formatted = parse_time(value)
                    .map_or(Value::Null, |t| {
                        Value::String(t.format(TIME_FORMAT).to_string())
                    });
                wire.insert(field.name.clone(), formatted);
            }
            FieldKind::DateTime => {
                let formatted = parse_datetime(value)
                    .map_or(Value::Null, |dt| {
                        Value::String(dt.format(DATETIME_FORMAT).to_string())
                    });
                wire.insert(field.name.clone(), formatted);
            }
            FieldKind::DateRange => {
                if let Value::DateRange(start, end) = value {
                    wire.insert(
                        range_start_key(&field.name),
                        Value::String(start.format(DATE_FORMAT).to_string()),
                    );
                    wire.insert(
                        range_end_key(&field.name),
                        Value::String(end.format(DATE_FORMAT).to_string()),
                    );
                    wire.remove(&field.name);
                } else {
                    wire.insert(field.name.clone(), Value::Null);
                }
            }
            _ => {}
        }
    }

    wire
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Rule;
    use campus_erp_core::value::UploadFile;

    fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("name", "Name", FieldKind::Text).rule(Rule::required("required")),
            FieldDef::new("admission_date", "Admission Date", FieldKind::Date),
            FieldDef::new("pickup_time", "Pickup Time", FieldKind::Time),
            FieldDef::new("enrolled_at", "Enrolled At", FieldKind::DateTime),
            FieldDef::new("session", "Session", FieldKind::DateRange),
            FieldDef::new("photo", "Photo", FieldKind::File),
        ]
    }

    #[test]
    fn test_wire_to_edit_parses_dates() {
        let mut record = HashMap::new();
        record.insert("admission_date".into(), Value::String("2025-04-01".into()));
        record.insert("pickup_time".into(), Value::String("07:30:00".into()));
        record.insert(
            "enrolled_at".into(),
            Value::String("2025-04-01 07:30:00".into()),
        );

        let edit = wire_to_edit(&fields(), &record);
        assert_eq!(edit["admission_date"], Value::Date(date(2025, 4, 1)));
        assert_eq!(
            edit["pickup_time"],
            Value::Time(chrono::NaiveTime::from_hms_opt(7, 30, 0).unwrap())
        );
        assert!(matches!(edit["enrolled_at"], Value::DateTime(_)));
    }

    #[test]
    fn test_wire_to_edit_folds_range_pair() {
        let mut record = HashMap::new();
        record.insert("sessionStart".into(), Value::String("2025-04-01".into()));
        record.insert("sessionEnd".into(), Value::String("2026-03-31".into()));

        let edit = wire_to_edit(&fields(), &record);
        assert_eq!(
            edit["session"],
            Value::DateRange(date(2025, 4, 1), date(2026, 3, 31))
        );
        assert!(!edit.contains_key("sessionStart"));
        assert!(!edit.contains_key("sessionEnd"));
    }

    #[test]
    fn test_wire_to_edit_unparseable_left_absent() {
        let mut record = HashMap::new();
        record.insert("admission_date".into(), Value::String("not-a-date".into()));
        let edit = wire_to_edit(&fields(), &record);
        assert!(!edit.contains_key("admission_date"));
    }

    #[test]
    fn test_wire_to_edit_file_ref() {
        let mut record = HashMap::new();
        record.insert("photo".into(), Value::String("/media/photo.png".into()));
        let edit = wire_to_edit(&fields(), &record);
        assert_eq!(edit["photo"], Value::FileRef("/media/photo.png".into()));
    }

    #[test]
    fn test_edit_to_wire_formats() {
        let mut values = HashMap::new();
        values.insert("admission_date".into(), Value::Date(date(2025, 4, 1)));
        values.insert(
            "pickup_time".into(),
            Value::Time(chrono::NaiveTime::from_hms_opt(7, 30, 0).unwrap()),
        );

        let wire = edit_to_wire(&fields(), &values);
        assert_eq!(wire["admission_date"], Value::String("2025-04-01".into()));
        assert_eq!(wire["pickup_time"], Value::String("07:30:00".into()));
    }

    #[test]
    fn test_edit_to_wire_expands_range() {
        let mut values = HashMap::new();
        values.insert(
            "session".into(),
            Value::DateRange(date(2025, 4, 1), date(2026, 3, 31)),
        );

        let wire = edit_to_wire(&fields(), &values);
        assert_eq!(wire["sessionStart"], Value::String("2025-04-01".into()));
        assert_eq!(wire["sessionEnd"], Value::String("2026-03-31".into()));
        assert!(!wire.contains_key("session"));
    }

    #[test]
    fn test_edit_to_wire_unparseable_becomes_null() {
        let mut values = HashMap::new();
        values.insert("admission_date".into(), Value::String("garbage".into()));
        let wire = edit_to_wire(&fields(), &values);
        assert_eq!(wire["admission_date"], Value::Null);
    }

    #[test]
    fn test_edit_to_wire_skips_files() {
        let mut values = HashMap::new();
        values.insert(
            "photo".into(),
            Value::File(UploadFile::new("p.png", "image/png", vec![1, 2, 3])),
        );
        let wire = edit_to_wire(&fields(), &values);
        // untouched, bytes intact
        assert_eq!(
            wire["photo"],
            Value::File(UploadFile::new("p.png", "image/png", vec![1, 2, 3]))
        );
    }

    #[test]
    fn test_round_trip_is_format_stable() {
        let mut record = HashMap::new();
        record.insert("admission_date".into(), Value::String("2025-04-01".into()));
        record.insert("pickup_time".into(), Value::String("07:30:00".into()));
        record.insert(
            "enrolled_at".into(),
            Value::String("2025-04-01 07:30:00".into()),
        );
        record.insert("sessionStart".into(), Value::String("2025-04-01".into()));
        record.insert("sessionEnd".into(), Value::String("2026-03-31".into()));

        let fields = fields();
        let wire = edit_to_wire(&fields, &wire_to_edit(&fields, &record));
        for key in [
            "admission_date",
            "pickup_time",
            "enrolled_at",
            "sessionStart",
            "sessionEnd",
        ] {
            assert_eq!(wire[key], record[key], "{key} not format-stable");
        }
    }
}
