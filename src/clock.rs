/// Time sources and the live elapsed-time display cache.
use chrono::{DateTime, Duration, Local};

use crate::types::TimerState;

/// Reader of the current wall-clock instant.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Whole seconds from `start` to `now`, rounded down and never negative.
pub fn elapsed_since(start: DateTime<Local>, now: DateTime<Local>) -> i64 {
    now.signed_duration_since(start).num_seconds().max(0)
}

/// Display-side cache of the running timer's elapsed seconds.
///
/// Armed while the timer runs and refreshed at most once per cadence.
/// Disarming drops the start instant so late ticks cannot revive it.
#[derive(Clone, Debug)]
pub struct ElapsedClock {
    start: Option<DateTime<Local>>,
    last_refresh: Option<DateTime<Local>>,
    elapsed: i64,
    cadence: Duration,
}

impl Default for ElapsedClock {
    fn default() -> Self {
        Self::new(Duration::seconds(1))
    }
}

impl ElapsedClock {
    pub fn new(cadence: Duration) -> Self {
        Self {
            start: None,
            last_refresh: None,
            elapsed: 0,
            cadence,
        }
    }

    /// Re-arms or tears down after a state transition, recomputing immediately.
    pub fn sync(&mut self, state: &TimerState, now: DateTime<Local>) {
        match state.start_time() {
            Some(start) => {
                self.start = Some(start);
                self.refresh(start, now);
            }
            None => self.disarm(),
        }
    }

    /// Refreshes the cached value if armed and the cadence has elapsed.
    /// Returns whether a refresh happened.
    pub fn tick(&mut self, now: DateTime<Local>) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let due = self
            .last_refresh
            .map(|last| now.signed_duration_since(last) >= self.cadence || now < last)
            .unwrap_or(true);
        if due {
            self.refresh(start, now);
        }
        due
    }

    pub fn disarm(&mut self) {
        self.start = None;
        self.last_refresh = None;
        self.elapsed = 0;
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.start.is_some()
    }

    pub fn elapsed(&self) -> i64 {
        self.elapsed
    }

    fn refresh(&mut self, start: DateTime<Local>, now: DateTime<Local>) {
        self.elapsed = elapsed_since(start, now);
        self.last_refresh = Some(now);
    }
}

#[cfg(test)]
pub use manual::ManualClock;
