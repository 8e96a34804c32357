//! Time-related utilities with clock abstraction for testability.
//!
//! Chat rooms display times in Korea Standard Time (UTC+9, no DST).

use chrono::{DateTime, FixedOffset, Utc};

const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_kst_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

fn kst_offset() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("UTC+9 is within the valid offset range")
}

fn to_kst(timestamp_millis: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis).map(|dt| dt.with_timezone(&kst_offset()))
}

/// Get current Unix timestamp (milliseconds)
///
/// Unix time has no zone; the name records that every rendering of it
/// in this project happens in KST.
pub fn get_kst_timestamp() -> i64 {
    Utc::now().with_timezone(&kst_offset()).timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to KST RFC 3339 format
pub fn timestamp_to_kst_rfc3339(timestamp_millis: i64) -> String {
    to_kst(timestamp_millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

/// Convert Unix timestamp (milliseconds) to a KST wall clock time (`HH:MM:SS`)
pub fn timestamp_to_kst_clock_time(timestamp_millis: i64) -> String {
    to_kst(timestamp_millis)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
