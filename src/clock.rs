//! Clock abstraction
//!
//! The sampling loop never calls `Local::now()` directly; time comes in
//! through a `Clock` so tests can drive ticks and poll boundaries with
//! explicit timestamps.

use chrono::{DateTime, Local};

/// Source of the current wall-clock time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
