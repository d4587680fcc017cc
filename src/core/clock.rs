// Wall-clock reads at microsecond resolution.
use time::OffsetDateTime;

/// Microseconds since the Unix epoch, truncated from the nanosecond clock.
pub fn now_micros() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000) as i64
}
