//! Fixed-window write throttle keyed by user identity.
//!
//! Bounds accidental write storms from a single user's client; not a
//! security control. State is process-local and resets on restart.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

struct Window {
    count: u32,
    resets_at: DateTime<Utc>,
}

/// Per-identity fixed window counter. The clock is injected on every
/// call so behavior is testable without sleeping.
pub struct RateGate {
    windows: DashMap<String, Window>,
    max_admits: u32,
    window: Duration,
}

impl RateGate {
    pub const DEFAULT_MAX_ADMITS: u32 = 30;
    pub const DEFAULT_WINDOW_SECS: i64 = 60;

    pub fn new(max_admits: u32, window_secs: i64) -> Self {
        Self {
            windows: DashMap::new(),
            max_admits,
            window: Duration::seconds(window_secs),
        }
    }

    /// Admit or reject a write attempt for `identity` at `now`.
    ///
    /// The first admit for an identity, or the first after window
    /// expiry, resets the count and opens a new window. Once the count
    /// reaches the maximum, further attempts in the same window are
    /// rejected outright; nothing is queued or delayed.
    pub fn admit(&self, identity: &str, now: DateTime<Utc>) -> bool {
        let mut entry = self
            .windows
            .entry(identity.to_string())
            .or_insert_with(|| Window {
                count: 0,
                resets_at: now + self.window,
            });

        let window = entry.value_mut();
        if now > window.resets_at {
            window.count = 1;
            window.resets_at = now + self.window;
            return true;
        }
        if window.count >= self.max_admits {
            return false;
        }
        window.count += 1;
        true
    }
}

impl Default for RateGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ADMITS, Self::DEFAULT_WINDOW_SECS)
    }
}
