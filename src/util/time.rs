//! Calendar helpers.
//!
//! All day and month boundaries are UTC calendar boundaries. Every helper
//! takes `now` explicitly so callers (and tests) control the clock.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::sync::RwLock;

/// Source of the current time for the async manager.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used by demos and tests that need
/// to step over cooldown windows.
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: RwLock::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// True when `date` is the calendar day of `now`. A missing date is never today.
pub fn is_today(date: Option<NaiveDate>, now: DateTime<Utc>) -> bool {
    date == Some(now.date_naive())
}

/// True when `date` falls in the calendar month of `now`.
pub fn is_same_month(date: Option<NaiveDate>, now: DateTime<Utc>) -> bool {
    match date {
        Some(d) => d.year() == now.year() && d.month() == now.month(),
        None => false,
    }
}

/// Fractional hours elapsed from `since` to `now`. Negative if `since` is in the future.
pub fn hours_since(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - since).num_milliseconds() as f64 / 3_600_000.0
}

/// First day of the month containing `now`.
pub fn month_start(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive().with_day(1).unwrap_or_else(|| now.date_naive())
}
