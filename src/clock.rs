// src/clock.rs

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Format used to embed a run's start time in file names.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Source of "now" for a run.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    at: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at: Mutex::new(at) }
    }

    pub fn advance(&self, by: Duration) {
        let mut at = self.at.lock().unwrap_or_else(|e| e.into_inner());
        *at += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.at.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Start instant of one run; every file name of that run derives from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStamp(DateTime<Utc>);

impl RunStamp {
    pub fn capture(clock: &dyn Clock) -> Self {
        Self(clock.now())
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.0
    }

    /// `YYYYMMDD_HHMMSS`
    pub fn file_stamp(&self) -> String {
        self.0.format(FILE_STAMP_FORMAT).to_string()
    }
}

impl From<DateTime<Utc>> for RunStamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}
