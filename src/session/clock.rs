use chrono::{NaiveDate, Utc};

/// Source of the calendar day used to pick the daily game
pub trait GameClock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Current UTC date
#[derive(Debug, Default, Clone, Copy)]
pub struct UtcClock;

impl GameClock for UtcClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl GameClock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
