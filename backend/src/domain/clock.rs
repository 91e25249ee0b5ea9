use chrono::{NaiveDate, Utc};

/// Source of the current calendar day
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, UTC day
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always returns the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
