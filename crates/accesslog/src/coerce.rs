//! Coerce — raw captures to typed values.

use chrono::DateTime;

use crate::model::FieldValue;

/// Default strptime-style layout for the bracketed Apache timestamp,
/// e.g. `10/Jul/2025:09:30:00 +0700`.
pub const DEFAULT_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// `status` and `size` parse as integers, with the literal `-` size being
/// the logged form of zero. `time` parses against the caller-supplied
/// layout. Anything unparseable is marked missing rather than failing the
/// record; all other fields pass through as raw text.
pub(crate) fn coerce(name: &str, raw: &str, time_format: &str) -> FieldValue {
    match name {
        "status" => int_value(raw),
        "size" if raw == "-" => FieldValue::Int(0),
        "size" => int_value(raw),
        "time" => time_value(raw, time_format),
        _ => FieldValue::Text(raw.to_string()),
    }
}

fn int_value(raw: &str) -> FieldValue {
    raw.parse::<i64>()
        .map(FieldValue::Int)
        .unwrap_or(FieldValue::Missing)
}

fn time_value(raw: &str, layout: &str) -> FieldValue {
    DateTime::parse_from_str(raw, layout)
        .map(FieldValue::Time)
        .unwrap_or(FieldValue::Missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_size_dash_is_zero() {
        assert_eq!(
            coerce("size", "-", DEFAULT_TIME_FORMAT),
            FieldValue::Int(0)
        );
    }

    #[test]
    fn test_size_numeric() {
        assert_eq!(
            coerce("size", "1234", DEFAULT_TIME_FORMAT),
            FieldValue::Int(1234)
        );
    }

    #[test]
    fn test_size_garbage_is_missing() {
        assert_eq!(
            coerce("size", "12x4", DEFAULT_TIME_FORMAT),
            FieldValue::Missing
        );
    }

    #[test]
    fn test_status_numeric() {
        assert_eq!(
            coerce("status", "200", DEFAULT_TIME_FORMAT),
            FieldValue::Int(200)
        );
    }

    #[test]
    fn test_status_garbage_is_missing() {
        assert_eq!(
            coerce("status", "2xx", DEFAULT_TIME_FORMAT),
            FieldValue::Missing
        );
    }

    #[test]
    fn test_time_default_layout() {
        let expected = FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 7, 10, 9, 30, 0)
            .unwrap();
        assert_eq!(
            coerce("time", "10/Jul/2025:09:30:00 +0700", DEFAULT_TIME_FORMAT),
            FieldValue::Time(expected)
        );
    }

    #[test]
    fn test_time_negative_offset() {
        let expected = FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2000, 10, 10, 13, 55, 36)
            .unwrap();
        assert_eq!(
            coerce("time", "10/Oct/2000:13:55:36 -0700", DEFAULT_TIME_FORMAT),
            FieldValue::Time(expected)
        );
    }

    #[test]
    fn test_time_garbage_is_missing() {
        assert_eq!(
            coerce("time", "not a timestamp", DEFAULT_TIME_FORMAT),
            FieldValue::Missing
        );
    }

    #[test]
    fn test_time_custom_layout() {
        let expected = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 7, 10, 9, 30, 0)
            .unwrap();
        assert_eq!(
            coerce("time", "2025-07-10 09:30:00 +0000", "%Y-%m-%d %H:%M:%S %z"),
            FieldValue::Time(expected)
        );
    }

    #[test]
    fn test_other_fields_pass_through() {
        assert_eq!(
            coerce("url", "/index.html", DEFAULT_TIME_FORMAT),
            FieldValue::Text("/index.html".to_string())
        );
        // Empty-but-present captures stay empty strings, not missing.
        assert_eq!(
            coerce("referer", "", DEFAULT_TIME_FORMAT),
            FieldValue::Text(String::new())
        );
    }
}
