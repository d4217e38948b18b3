//! Shape validation for the `/sensors` and `/errors` payloads.
//!
//! Both validators are all-or-nothing: every problem is collected and
//! reported, and no partially valid value is ever returned. Unknown extra
//! keys on an object are ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{EntryError, EntryProblem, ErrorLogSchemaError, FieldError, FieldIssue, SchemaError};
use crate::models::{ErrorLog, ErrorLogEntry, SensorReading};
use crate::variables::VariableId;

// ---

/// Validate a decoded `/sensors` body.
///
/// All twenty fields must be present as finite JSON numbers.
pub fn validate_sensor_reading(value: &Value) -> Result<SensorReading, SchemaError> {
    // ---
    let obj = value.as_object().ok_or(SchemaError::NotAnObject {
        found: json_type(value),
    })?;

    let mut values = [0.0; 20];
    let mut problems = Vec::new();

    for (slot, id) in values.iter_mut().zip(VariableId::ALL) {
        match number_field(obj, id.key()) {
            Ok(v) => *slot = v,
            Err(issue) => problems.push(FieldError { field: id.key(), issue }),
        }
    }

    if !problems.is_empty() {
        return Err(SchemaError::Fields(problems));
    }

    for key in obj.keys().filter(|k| VariableId::from_key(k).is_none()) {
        tracing::debug!("Ignoring unknown sensor field {:?}", key);
    }

    Ok(SensorReading::from_ordered(values))
}

/// Validate a decoded `/errors` body. An empty array is valid.
pub fn validate_error_log(value: &Value) -> Result<ErrorLog, ErrorLogSchemaError> {
    // ---
    let items = value.as_array().ok_or(ErrorLogSchemaError::NotAnArray {
        found: json_type(value),
    })?;

    let mut entries = Vec::with_capacity(items.len());
    let mut problems = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match validate_entry(item) {
            Ok(entry) => entries.push(entry),
            Err(found) => problems.extend(found.into_iter().map(|problem| EntryError { index, problem })),
        }
    }

    if problems.is_empty() {
        Ok(ErrorLog::new(entries))
    } else {
        Err(ErrorLogSchemaError::Entries(problems))
    }
}

fn validate_entry(item: &Value) -> Result<ErrorLogEntry, Vec<EntryProblem>> {
    // ---
    let Some(obj) = item.as_object() else {
        return Err(vec![EntryProblem::NotAnObject {
            found: json_type(item),
        }]);
    };

    let id = match obj.get("id") {
        None => Err(FieldIssue::Missing),
        Some(v) => integer(v),
    };

    let message = match obj.get("message") {
        None => Err(FieldIssue::Missing),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v) => Err(FieldIssue::WrongType { found: json_type(v) }),
    };

    let timestamp = match obj.get("timestamp") {
        None => Err(FieldIssue::Missing),
        Some(Value::String(s)) => parse_timestamp(s).ok_or_else(|| FieldIssue::Unparsable { value: s.clone() }),
        Some(v) => Err(FieldIssue::WrongType { found: json_type(v) }),
    };

    match (id, message, timestamp) {
        (Ok(id), Ok(message), Ok(timestamp)) => Ok(ErrorLogEntry { id, message, timestamp }),
        (id, message, timestamp) => {
            let problems = [
                ("id", id.err()),
                ("message", message.err()),
                ("timestamp", timestamp.err()),
            ]
            .into_iter()
            .filter_map(|(field, issue)| issue.map(|issue| EntryProblem::Field(FieldError { field, issue })))
            .collect();
            Err(problems)
        }
    }
}

/// `serde_json` (without `arbitrary_precision`) never stores NaN or an
/// infinity in a `Value`, so the `NonFinite` arm only guards readings built
/// some other way.
fn number_field(obj: &Map<String, Value>, key: &str) -> Result<f64, FieldIssue> {
    // ---
    match obj.get(key) {
        None => Err(FieldIssue::Missing),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(FieldIssue::NonFinite),
        },
        Some(v) => Err(FieldIssue::WrongType { found: json_type(v) }),
    }
}

/// Accepts RFC 3339, ISO-8601 without offset (as UTC), `YYYY-MM-DD HH:MM:SS`
/// and a bare date.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // ---
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Integral numbers are ids whatever their JSON spelling (`7`, `7.0`, `7e0`).
fn integer(v: &Value) -> Result<i64, FieldIssue> {
    // ---
    let Value::Number(n) = v else {
        return Err(FieldIssue::WrongType { found: json_type(v) });
    };

    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if n.is_u64() {
        return Err(FieldIssue::OutOfRange);
    }

    let range = i64::MIN as f64..-(i64::MIN as f64);
    match n.as_f64() {
        Some(f) if f.fract() != 0.0 => Err(FieldIssue::WrongType { found: "non-integer number" }),
        Some(f) if range.contains(&f) => Ok(f as i64),
        _ => Err(FieldIssue::OutOfRange),
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{TimeZone, Timelike};
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn valid_payload() -> Value {
        // ---
        json!({
            "temperature": 10, "humidity": 45, "windSpeed": 3, "pressure": 100,
            "luminosity": 500, "soilMoisture": 35, "ETo": 3, "TmaxC": 25,
            "TminC": 10, "Tmean": 18, "Rs": 15, "Rns": 10, "Ra": 7, "Rso": 7,
            "Rnl": 3, "Rn": 15, "delta": 0.1, "gamma": 0.06, "es": 2.3, "ea": 1.8
        })
    }

    #[test]
    fn test_accepts_complete_payload() {
        // ---
        let reading = assert_ok!(validate_sensor_reading(&valid_payload()));

        assert_eq!(reading.temperature, 10.0);
        assert_eq!(reading.soil_moisture, 35.0);
        assert_eq!(reading.gamma, 0.06);
        assert_eq!(reading.ea, 1.8);
    }

    #[test]
    fn test_rejects_each_missing_field() {
        // ---
        for id in VariableId::ALL {
            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove(id.key());

            let err = assert_err!(validate_sensor_reading(&payload));
            assert_eq!(
                err.fields(),
                &[FieldError { field: id.key(), issue: FieldIssue::Missing }],
                "{id}"
            );
        }
    }

    #[test]
    fn test_rejects_wrong_types() {
        // ---
        let mut payload = valid_payload();
        payload["humidity"] = json!("45");
        payload["pressure"] = Value::Null;
        payload["Rn"] = json!([15]);

        let err = assert_err!(validate_sensor_reading(&payload));
        assert_eq!(
            err.fields(),
            &[
                FieldError { field: "humidity", issue: FieldIssue::WrongType { found: "string" } },
                FieldError { field: "pressure", issue: FieldIssue::WrongType { found: "null" } },
                FieldError { field: "Rn", issue: FieldIssue::WrongType { found: "array" } },
            ]
        );
    }

    #[test]
    fn test_rejects_non_object() {
        // ---
        let err = assert_err!(validate_sensor_reading(&json!([1, 2, 3])));
        assert_eq!(err, SchemaError::NotAnObject { found: "array" });
        assert!(err.fields().is_empty());
    }

    #[test]
    fn test_ignores_extra_keys() {
        // ---
        let mut payload = valid_payload();
        payload["co2"] = json!(412);
        assert_ok!(validate_sensor_reading(&payload));
    }

    #[test]
    fn test_error_log_accepts_empty() {
        // ---
        let log = assert_ok!(validate_error_log(&json!([])));
        assert!(log.is_empty());
    }

    #[test]
    fn test_error_log_keeps_server_order() {
        // ---
        let log = assert_ok!(validate_error_log(&json!([
            { "id": 7, "message": "sensor offline", "timestamp": "2025-03-26T18:45:00Z" },
            { "id": 3, "message": "checksum", "timestamp": "2025-03-26T15:45:00-03:00" },
        ])));

        let ids: Vec<_> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 3]);
        assert_eq!(log.entries()[0].timestamp, log.entries()[1].timestamp);
        assert_eq!(log.entries()[0].timestamp.hour(), 18);
    }

    #[test]
    fn test_error_log_one_bad_timestamp_fails_batch() {
        // ---
        let err = assert_err!(validate_error_log(&json!([
            { "id": 1, "message": "ok", "timestamp": "2025-03-26T18:45:00Z" },
            { "id": 2, "message": "bad", "timestamp": "not a date" },
            { "id": 3, "message": "ok", "timestamp": "2025-03-27 08:00:00" },
        ])));

        assert_eq!(
            err,
            ErrorLogSchemaError::Entries(vec![EntryError {
                index: 1,
                problem: EntryProblem::Field(FieldError {
                    field: "timestamp",
                    issue: FieldIssue::Unparsable { value: "not a date".into() },
                }),
            }])
        );
    }

    #[test]
    fn test_error_log_entry_types() {
        // ---
        let err = assert_err!(validate_error_log(&json!([
            { "id": 1.5, "message": 4, "timestamp": 0 },
            "oops",
        ])));

        let ErrorLogSchemaError::Entries(problems) = err else {
            panic!("expected entry problems");
        };
        assert_eq!(problems.len(), 4);
        assert_eq!(
            problems[0].problem,
            EntryProblem::Field(FieldError {
                field: "id",
                issue: FieldIssue::WrongType { found: "non-integer number" },
            })
        );
        assert_eq!(problems[3].index, 1);
        assert_eq!(problems[3].problem, EntryProblem::NotAnObject { found: "string" });
    }

    #[test]
    fn test_error_log_integral_ids() {
        // ---
        let log = assert_ok!(validate_error_log(&json!([
            { "id": 1.0, "message": "a", "timestamp": "2025-03-26" },
            { "id": -4, "message": "b", "timestamp": "2025-03-26" },
            { "id": 9223372036854775807u64, "message": "c", "timestamp": "2025-03-26" },
        ])));
        let ids: Vec<_> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, -4, i64::MAX]);

        let err = assert_err!(validate_error_log(&json!([
            { "id": 18446744073709551615u64, "message": "a", "timestamp": "2025-03-26" },
            { "id": 1.0e19, "message": "b", "timestamp": "2025-03-26" },
        ])));
        let ErrorLogSchemaError::Entries(problems) = err else {
            panic!("expected entry problems");
        };
        let out_of_range = FieldError {
            field: "id",
            issue: FieldIssue::OutOfRange,
        };
        assert_eq!(out_of_range.to_string(), "id: integer out of range");
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].problem, EntryProblem::Field(out_of_range.clone()));
        assert_eq!(problems[1].problem, EntryProblem::Field(out_of_range));
    }

    #[test]
    fn test_json_cannot_carry_non_finite() {
        // ---
        assert!(serde_json::Number::from_f64(f64::NAN).is_none());
        assert!(serde_json::Number::from_f64(f64::INFINITY).is_none());
        assert_eq!(json!(f64::NAN), Value::Null);
    }

    #[test]
    fn test_error_log_rejects_object() {
        // ---
        let err = assert_err!(validate_error_log(&json!({ "errors": [] })));
        assert_eq!(err, ErrorLogSchemaError::NotAnArray { found: "object" });
    }

    #[test]
    fn test_timestamp_formats() {
        // ---
        let expected = Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap();

        assert_eq!(parse_timestamp("2025-03-26T18:45:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-26T18:45:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-26T13:45:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-26T18:45:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-26 18:45:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-03-26"),
            Some(Utc.with_ymd_and_hms(2025, 3, 26, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("26/03/2025"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
