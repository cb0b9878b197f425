use chrono::{Local, NaiveDateTime, Timelike};

/// Source of the local wall-clock time. Handlers never read the system clock directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        // records carry second precision
        now.with_nanosecond(0).unwrap_or(now)
    }
}

#[cfg(test)]
pub use fixed::FixedClock;
