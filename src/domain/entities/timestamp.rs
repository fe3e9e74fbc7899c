use chrono::{DateTime, Utc};

/// Converts a UNIX timestamp in milliseconds to a UTC instant. Values outside
/// chrono's representable range saturate to the nearest bound.
pub fn datetime_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
