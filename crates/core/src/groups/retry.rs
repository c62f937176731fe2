//! Retry limits and sleep durations for group writes.

use std::time::Duration;

pub const DEFAULT_MAX_TRIES: u32 = 5;
pub const MIN_MAX_TRIES: u32 = 1;
pub const MAX_MAX_TRIES: u32 = 10;
/// Minimum pause between two write attempts.
pub const RETRY_SLEEP_FLOOR_SECS: u64 = 10;

/// Retry settings for one upload run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_tries: u32,
    sleep_seconds: u64,
}

impl RetryPolicy {
    /// Build a policy from raw inputs; an unusable `max_tries` falls back to the default.
    pub fn new(max_tries: Option<&str>, sleep_seconds: u64) -> Self {
        Self {
            max_tries: parse_max_tries(max_tries),
            sleep_seconds,
        }
    }

    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    pub fn sleep_seconds(&self) -> u64 {
        self.sleep_seconds
    }

    /// Pause before the next attempt after a non-success response.
    pub fn retry_delay(&self) -> Duration {
        if self.sleep_seconds > RETRY_SLEEP_FLOOR_SECS {
            Duration::from_secs(self.sleep_seconds)
        } else {
            Duration::from_secs(RETRY_SLEEP_FLOOR_SECS)
        }
    }

    /// Pause after a successful write. Uses the configured value as-is, no floor.
    pub fn pacing_delay(&self) -> Option<Duration> {
        (self.sleep_seconds > 0).then(|| Duration::from_secs(self.sleep_seconds))
    }
}

/// Parse a raw `max_tries` value, silently resetting anything outside 1..=10.
pub fn parse_max_tries(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| (i64::from(MIN_MAX_TRIES)..=i64::from(MAX_MAX_TRIES)).contains(value))
        .map(|value| value as u32)
        .unwrap_or(DEFAULT_MAX_TRIES)
}
