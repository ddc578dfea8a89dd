//! Time source and display zone
//!
//! Everything that needs "now" (cache freshness, the simulated chart, the
//! last-updated stamp) reads it through a [`Clock`] so tests can move time.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use std::sync::{Arc, Mutex};

/// Source of the current time
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same instant, so a test can keep one handle and give
/// another to the code under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Zone used for calendar dates and the human-readable stamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub offset: FixedOffset,
    /// Label printed after the time, e.g. "IST"
    pub label: String,
}

impl Zone {
    /// India Standard Time, UTC+05:30
    pub fn ist() -> Self {
        Self {
            offset: FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap_or(Utc.fix()),
            label: "IST".to_string(),
        }
    }

    /// Calendar date of `instant` in this zone
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::ist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances_shared_instant() {
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let handle = clock.clone();

        handle.advance(chrono::Duration::minutes(5));

        assert_eq!(clock.now(), start + chrono::Duration::minutes(5));
    }

    #[test]
    fn test_ist_date_rolls_over_before_utc() {
        // 20:00 UTC is 01:30 the next day in IST
        let instant = Utc.with_ymd_and_hms(2026, 3, 31, 20, 0, 0).unwrap();
        let zone = Zone::ist();

        assert_eq!(zone.date_of(instant), NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        assert_eq!(zone.offset.local_minus_utc(), 19_800);
        assert_eq!(zone.label, "IST");
    }
}
