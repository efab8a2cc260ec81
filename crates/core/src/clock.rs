//! Source of "today" for visit logging.

use chrono::{Local, NaiveDate};

pub trait Clock {
    /// The current calendar date, without a time of day.
    fn today(&self) -> NaiveDate;
}

/// Reads the local system date.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
