//! Calendar "today" source for mood retention and trend windows.

use chrono::{Days, Local, NaiveDate};
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the running machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct ManualClock {
    today: Cell<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Moves "today" forward by `days`; saturates at the calendar maximum.
    pub fn advance_days(&self, days: u64) {
        let current = self.today.get();
        self.today
            .set(current.checked_add_days(Days::new(days)).unwrap_or(current));
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock};
    use chrono::NaiveDate;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.today(), start);

        clock.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        clock.set_today(start);
        assert_eq!(clock.today(), start);
    }
}
