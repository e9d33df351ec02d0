//! Deterministic `Clock` implementation for tests.

use chrono::{DateTime, TimeZone, Utc};
use pok_core::clock::Clock;

/// Unix milliseconds of the instant returned by [`fixed_clock`].
pub const FIXED_MILLIS: i64 = 1_768_471_200_000;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A clock frozen at 2026-01-15T10:00:00Z.
///
/// # Panics
///
/// Never; the date is a valid constant.
#[must_use]
pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
}
