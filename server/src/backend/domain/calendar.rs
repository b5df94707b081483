//! Calendar domain logic for the booking calendar.
//!
//! This module holds the civil-calendar arithmetic behind the month grid:
//! month lengths, leap years, weekday offsets, month navigation and the
//! 42-cell month view. It knows nothing about availability; classification
//! lives in the availability calendar widget.

use log::debug;
use shared::{CalendarDate, CalendarDayType, CalendarFocusDate};

/// Number of cells in a rendered month (6 rows of 7 days)
pub const GRID_CELLS: usize = 42;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Stateless calendar arithmetic
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            2 => if self.is_leap_year(year) { 29 } else { 28 },
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Proleptic Gregorian leap year rule
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: i32) -> u32 {
        match CalendarDate::from_ymd(year, month, 1) {
            Some(date) => date.weekday_from_sunday(),
            // Invalid date, fallback to 0 (Sunday)
            None => 0,
        }
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    /// "March 2025"
    pub fn month_label(&self, focus: CalendarFocusDate) -> String {
        format!("{} {}", self.month_name(focus.month), focus.year)
    }

    /// Format a date for human-readable display, e.g. "March 12, 2025"
    pub fn format_date_for_display(&self, date: CalendarDate) -> String {
        format!("{} {}, {}", self.month_name(date.month()), date.day(), date.year())
    }

    /// The month containing `date`
    pub fn focus_of(&self, date: CalendarDate) -> CalendarFocusDate {
        CalendarFocusDate {
            month: date.month(),
            year: date.year(),
        }
    }

    /// Navigate to the previous month
    pub fn previous_month(&self, focus: CalendarFocusDate) -> CalendarFocusDate {
        if focus.month == 1 {
            CalendarFocusDate { month: 12, year: focus.year - 1 }
        } else {
            CalendarFocusDate { month: focus.month - 1, year: focus.year }
        }
    }

    /// Navigate to the next month
    pub fn next_month(&self, focus: CalendarFocusDate) -> CalendarFocusDate {
        if focus.month == 12 {
            CalendarFocusDate { month: 1, year: focus.year + 1 }
        } else {
            CalendarFocusDate { month: focus.month + 1, year: focus.year }
        }
    }

    /// Whether `date` falls inside the focused month
    pub fn is_in_month(&self, date: CalendarDate, focus: CalendarFocusDate) -> bool {
        date.month() == focus.month && date.year() == focus.year
    }

    /// Where a date sits relative to the focused month
    pub fn day_type(&self, date: CalendarDate, focus: CalendarFocusDate) -> CalendarDayType {
        if self.is_in_month(date, focus) {
            CalendarDayType::MonthDay
        } else if (date.year(), date.month()) < (focus.year, focus.month) {
            CalendarDayType::PaddingBefore
        } else {
            CalendarDayType::PaddingAfter
        }
    }

    /// First cell of the grid for `focus`, the Sunday on or before the 1st
    fn grid_start(&self, focus: CalendarFocusDate) -> Option<CalendarDate> {
        let first = CalendarDate::from_ymd(focus.year, focus.month, 1)?;
        first.add_days(-(self.first_day_of_month(focus.month, focus.year) as i64))
    }

    /// Whether every cell of the month's grid is a representable date
    pub fn is_renderable(&self, focus: CalendarFocusDate) -> bool {
        self.grid_start(focus)
            .and_then(|start| start.add_days(GRID_CELLS as i64 - 1))
            .is_some()
    }

    /// The 42 dates rendering `focus`, Sunday first.
    ///
    /// Starts with the last `first_day_of_month` days of the previous month,
    /// then every day of the month, then days of the next month until the grid
    /// is full. `None` when part of the grid falls outside chrono's range.
    pub fn compute_month_view(&self, focus: CalendarFocusDate) -> Option<Vec<CalendarDate>> {
        let start = self.grid_start(focus)?;
        let first_day = self.first_day_of_month(focus.month, focus.year);
        let days_in_month = self.days_in_month(focus.month, focus.year);

        debug!(
            "Computing month view for {}/{}: {} days, first weekday {}",
            focus.month, focus.year, days_in_month, first_day
        );

        // The grid is contiguous, so every cell is an offset from its first
        let days = (0..GRID_CELLS as i64)
            .map(|cell| start.add_days(cell))
            .collect::<Option<Vec<CalendarDate>>>()?;

        debug!(
            "Month view for {}/{}: {} padding before, {} padding after",
            focus.month,
            focus.year,
            first_day,
            GRID_CELLS as u32 - first_day - days_in_month
        );
        Some(days)
    }
}
