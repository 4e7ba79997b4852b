//! Display-timezone helpers.
//!
//! The dashboard renders registration times in a fixed UTC+8 offset at
//! minute precision; filter bounds arrive in the same textual form.

use chrono::{DateTime, FixedOffset, Utc};

const UTC8_SECONDS: i32 = 8 * 3600;

/// The fixed display offset (UTC+8).
pub fn utc8_offset() -> FixedOffset {
    FixedOffset::east_opt(UTC8_SECONDS).expect("UTC+8 is a valid offset")
}

/// Render an instant in the display form used across the tracker:
/// "YYYY-MM-DD HH:MM" in UTC+8, truncated to the minute.
pub fn to_utc8_minute_text(at: DateTime<Utc>) -> String {
    at.with_timezone(&utc8_offset())
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Normalize a caller-supplied time bound to the display form: the `T`
/// separator becomes a space and anything past minute precision is dropped.
pub fn normalize_minute_text(value: &str) -> String {
    value.replace('T', " ").chars().take(16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_utc8_minute_text() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 59).unwrap();
        // 23:30 UTC is 07:30 the next day in UTC+8; seconds are dropped.
        assert_eq!(to_utc8_minute_text(at), "2026-03-02 07:30");
    }

    #[test]
    fn normalizes_datetime_local_input() {
        assert_eq!(normalize_minute_text("2026-03-02T07:30"), "2026-03-02 07:30");
        assert_eq!(
            normalize_minute_text("2026-03-02 07:30:59"),
            "2026-03-02 07:30"
        );
        assert_eq!(normalize_minute_text(""), "");
    }

    #[test]
    fn display_text_is_derivable_from_the_instant() {
        let at = Utc.with_ymd_and_hms(2026, 8, 20, 16, 0, 0).unwrap();
        let text = to_utc8_minute_text(at);
        assert_eq!(text, "2026-08-21 00:00");
        // Re-normalizing the rendered form is a no-op.
        assert_eq!(normalize_minute_text(&text), text);
    }
}
