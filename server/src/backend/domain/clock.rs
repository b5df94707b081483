use chrono::Local;
use shared::CalendarDate;

/// Source of the calendar's "today"
pub trait Clock: Send + Sync {
    fn today(&self) -> CalendarDate;
}

/// The server's local date, read on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::from(Local::now().date_naive())
    }
}

/// Always the same day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}
