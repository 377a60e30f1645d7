//! Timestamp helpers
//!
//! Repositories and models store `i64` Unix millis; conversions happen here.

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
