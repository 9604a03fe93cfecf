//! Human-readable formatting: binary byte sizes, compact durations, relative times.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

const IEC_UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Format a byte count with base-1024 prefixes: `"1023 B"`, `"1.0 KiB"`, `"219 MiB"`.
///
/// One decimal is kept below 10 units; the scaled value is rounded to a tenth
/// first, so `1048575` renders as `"1024 KiB"` rather than jumping to MiB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 10 {
        return format!("{bytes} B");
    }
    let mut exp = 0usize;
    let mut scale = 1u64;
    while exp + 1 < IEC_UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        exp += 1;
    }
    let val = ((bytes as f64 / scale as f64) * 10.0 + 0.5).floor() / 10.0;
    if val < 10.0 {
        format!("{:.1} {}", val, IEC_UNITS[exp])
    } else {
        format!("{:.0} {}", val, IEC_UNITS[exp])
    }
}

/// Format a signed byte count, clamping negatives (inconsistent counters) to zero.
pub fn format_bytes_i64(bytes: i64) -> String {
    format_bytes(u64::try_from(bytes).unwrap_or(0))
}

/// Format a throughput as `"<size>/sec"`.
pub fn format_rate(bytes_per_sec: f64) -> String {
    let whole = if bytes_per_sec.is_finite() && bytes_per_sec > 0.0 {
        bytes_per_sec as u64
    } else {
        0
    };
    format!("{}/sec", format_bytes(whole))
}

/// Compact `"<d>d <h>h <m>m"` with zero components omitted; `"< 1m"` when nothing remains.
pub fn format_duration(d: Duration) -> String {
    let total_mins = d.num_minutes().max(0);
    let days = total_mins / (24 * 60);
    let hours = (total_mins / 60) % 24;
    let mins = total_mins % 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if mins > 0 {
        parts.push(format!("{mins}m"));
    }
    if parts.is_empty() {
        return "< 1m".to_string();
    }
    parts.join(" ")
}

/// RFC 3339 at second precision in UTC, e.g. `2024-05-01T12:00:00Z`.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;
const LONG_TIME: i64 = 37 * YEAR;

/// Coarse distance between two instants: `"now"`, `"5 minutes"`, `"3 days"`, ...
///
/// Direction is ignored; callers add "ago" or "from now" themselves.
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().saturating_abs();
    // (exclusive upper bound, fixed text, divisor, plural unit)
    let table: [(i64, Option<&str>, i64, &str); 16] = [
        (1, Some("now"), 1, ""),
        (2, Some("1 second"), 1, ""),
        (MINUTE, None, 1, "seconds"),
        (2 * MINUTE, Some("1 minute"), 1, ""),
        (HOUR, None, MINUTE, "minutes"),
        (2 * HOUR, Some("1 hour"), 1, ""),
        (DAY, None, HOUR, "hours"),
        (2 * DAY, Some("1 day"), 1, ""),
        (WEEK, None, DAY, "days"),
        (2 * WEEK, Some("1 week"), 1, ""),
        (MONTH, None, WEEK, "weeks"),
        (2 * MONTH, Some("1 month"), 1, ""),
        (YEAR, None, MONTH, "months"),
        (18 * MONTH, Some("1 year"), 1, ""),
        (2 * YEAR, Some("2 years"), 1, ""),
        (LONG_TIME, None, YEAR, "years"),
    ];
    for (bound, fixed, div, unit) in table {
        if secs < bound {
            return match fixed {
                Some(text) => text.to_string(),
                None => format!("{} {}", secs / div, unit),
            };
        }
    }
    "a long while".to_string()
}
