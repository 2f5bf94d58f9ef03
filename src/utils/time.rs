//! Time and timestamp utilities

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Current Unix timestamp in milliseconds
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Unix milliseconds for a captured instant
pub fn to_millis(at: &DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// Seconds elapsed since `started`, with sub-second precision
pub fn uptime_secs(started: Instant) -> f64 {
    started.elapsed().as_secs_f64()
}

/// First `max_chars` characters of `text`, for log previews
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
