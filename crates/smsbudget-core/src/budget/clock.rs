//! Wall-clock source for period rollover

use chrono::{Duration, Local, NaiveDate};
use parking_lot::Mutex;

/// Supplies the current local date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local system date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        *self.date.lock() = date;
    }

    pub fn advance_days(&self, days: i64) {
        let mut date = self.date.lock();
        *date += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
