//! Display helpers for table cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Timestamp the backend uses for "never".
pub const ZERO_TIMESTAMP: &str = "0001-01-01 00:00:00";

/// Date the backend uses for "unset".
pub const ZERO_DATE: &str = "0001-01-01";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `yyyy-MM-dd`, the wire format of date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Traffic values are stored in gibibytes.
pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

const BYTE_UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Human-readable size with 1024 steps, e.g. `2147483648.0` → `"2 GB"`.
pub fn readable_bytes(bytes: f64) -> String {
    if !bytes.is_finite() {
        return "-".to_owned();
    }

    let sign = if bytes < 0.0 { "-" } else { "" };
    let mut value = bytes.abs();
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    // 1023.999 KB shows as 1024 KB once rounded; carry it into the next unit.
    if round2(value) >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{sign}{} {}", trim_decimals(value), BYTE_UNITS[unit])
}

/// Display for a traffic quota stored in GiB.
pub fn readable_traffic(gib: f64) -> String {
    readable_bytes(gib * BYTES_PER_GIB)
}

/// Two decimals at most, without trailing zeros.
fn trim_decimals(value: f64) -> String {
    let fixed = format!("{value:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse `yyyy-MM-dd HH:mm:ss` or RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Text for an `updated` cell. The zero timestamp shows as nothing.
///
/// Parsed values use the `yyyy/M/d HH:mm:ss` locale layout; anything that
/// does not parse is shown as received.
pub fn format_updated(raw: &str) -> String {
    if raw.trim() == ZERO_TIMESTAMP {
        return String::new();
    }

    match parse_timestamp(raw) {
        Some(ts) => ts.format("%Y/%-m/%-d %H:%M:%S").to_string(),
        None => raw.to_owned(),
    }
}

/// Whether a date field still carries the "unset" marker.
pub fn is_zero_date(raw: &str) -> bool {
    raw.contains(ZERO_DATE)
}

/// Parse a date field value; the zero date and empty strings yield `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || is_zero_date(raw) {
        return None;
    }
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_bytes_steps_by_1024() {
        assert_eq!(readable_bytes(0.0), "0 B");
        assert_eq!(readable_bytes(512.0), "512 B");
        assert_eq!(readable_bytes(1536.0), "1.5 KB");
        assert_eq!(readable_bytes(1024.0 * 1024.0), "1 MB");
        assert_eq!(readable_bytes(f64::NAN), "-");
    }

    #[test]
    fn readable_bytes_carries_rounding_into_next_unit() {
        assert_eq!(readable_bytes(1024.0 * 1024.0 - 1.0), "1 MB");
        assert_eq!(readable_bytes(1023.999), "1 KB");
        assert_eq!(readable_bytes(-(1024.0 * 1024.0 - 1.0)), "-1 MB");
        assert_eq!(readable_bytes(1023.0), "1023 B");
    }

    #[test]
    fn traffic_is_gibibytes() {
        assert_eq!(readable_traffic(2.0), "2 GB");
        assert_eq!(readable_traffic(0.5), "512 MB");
        assert_eq!(readable_traffic(1536.0), "1.5 TB");
    }

    #[test]
    fn zero_timestamp_renders_empty() {
        assert_eq!(format_updated(ZERO_TIMESTAMP), "");
    }

    #[test]
    fn timestamps_render_in_locale_layout() {
        assert_eq!(format_updated("2024-01-05 08:03:09"), "2024/1/5 08:03:09");
        assert_eq!(format_updated("2024-01-05T08:03:09Z"), "2024/1/5 08:03:09");
        assert_eq!(format_updated("yesterday"), "yesterday");
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert!((round2(1.23456) - 1.23).abs() < f64::EPSILON);
        assert!((round2(2.005_1) - 2.01).abs() < 1e-9);
    }

    #[test]
    fn dates_skip_the_zero_marker() {
        assert_eq!(parse_date("0001-01-01"), None);
        assert_eq!(parse_date("0001-01-01T00:00:00Z"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(
            parse_date("2025-03-04"),
            NaiveDate::from_ymd_opt(2025, 3, 4)
        );
        assert_eq!(
            parse_date("2025-03-04 10:00:00"),
            NaiveDate::from_ymd_opt(2025, 3, 4)
        );
    }
}
