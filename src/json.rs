use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// parse an iso 8601 timestamp from the service, which has shipped several
/// shapes over time: with a trailing `Z`, with an explicit offset, and with
/// no offset at all (meaning utc). anything unparseable is treated as absent
/// rather than an error.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// timestamp stored under `key`, absent when missing or unparseable
pub(crate) fn timestamp_field(data: &Value, key: &str) -> Option<DateTime<Utc>> {
    data.get(key)
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timestamps_with_trailing_z() {
        let parsed = parse_timestamp("2024-10-30T02:03:48.716Z").unwrap();
        assert_eq!(parsed, "2024-10-30T02:03:48.716Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn parses_timestamps_with_explicit_offset() {
        let parsed = parse_timestamp("2024-12-14T12:00:30.000-05:00").unwrap();
        assert_eq!(parsed, "2024-12-14T17:00:30Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn assumes_utc_when_no_offset_is_given() {
        let parsed = parse_timestamp("2024-10-30T02:03:48.716").unwrap();
        assert_eq!(parsed, "2024-10-30T02:03:48.716Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn parses_timestamps_without_fractional_seconds() {
        let parsed = parse_timestamp("2023-01-01T12:00:00").unwrap();
        assert_eq!(parsed, "2023-01-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn unparseable_timestamps_are_absent() {
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-45T99:99:99Z"), None);
    }

    #[test]
    fn reads_timestamp_fields_defensively() {
        let data = serde_json::json!({
            "good": "2024-10-30T02:03:48.716Z",
            "bad": "yesterday",
            "wrong_type": 42,
        });

        assert!(timestamp_field(&data, "good").is_some());
        assert_eq!(timestamp_field(&data, "bad"), None);
        assert_eq!(timestamp_field(&data, "wrong_type"), None);
        assert_eq!(timestamp_field(&data, "missing"), None);
    }
}
