//! Timestamp formatting for the `timestamp=` record field

use chrono::{DateTime, Utc};

/// Format of the `timestamp=` field: ISO 8601 UTC with microseconds,
/// `2025-01-08T10:30:45.123456Z`.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

pub(crate) fn format_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format(RECORD_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(
            format_timestamp(&fixed_datetime()),
            "2025-01-08T10:30:45.123456Z"
        );
    }

    #[test]
    fn test_timestamp_has_no_reserved_characters() {
        let rendered = format_timestamp(&Utc::now());
        assert!(!rendered.contains(['\t', '\n', '\r', '=', '\\']));
    }
}
