//! Clock abstraction for time-dependent progression logic.
//!
//! Streak comparisons, weekly boss rollover and monthly grace-token refresh
//! all depend on the current date. The engine never reads the system clock
//! directly; it takes a [`Clock`] so tests can simulate day, week and month
//! boundaries deterministically.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};

/// Source of the current wall-clock time and calendar date.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Minutes since midnight for the current time.
    fn minute_of_day(&self) -> u32 {
        let t = self.now().time();
        t.hour() * 60 + t.minute()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock pinned to a fixed instant, advanced explicitly.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Convenience constructor from date + hour:minute.
    pub fn on(date: NaiveDate, hour: u32, minute: u32) -> Self {
        let now = date
            .and_hms_opt(hour, minute, 0)
            .expect("valid hour/minute")
            .and_utc();
        Self { now }
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn advance_days(&mut self, days: i64) {
        self.now += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Zero-based week index within the calendar year (days since Jan 1 / 7).
///
/// Matches the boss rotation cadence: a new boss every 7 days, resetting
/// at the start of each year.
pub fn week_of_year(date: NaiveDate) -> u32 {
    date.ordinal0() / 7
}
