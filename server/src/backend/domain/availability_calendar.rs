//! The availability calendar widget.
//!
//! One `AvailabilityCalendar` is one date picker: it is opened on today's
//! month, navigated a month at a time, and closed either explicitly or by a
//! successful selection. Every cell of the displayed month is classified as
//! today, available, booked or disabled. Only available days (and today, when
//! it is explicitly available) can be selected; selecting one hands the
//! canonical date string to the selection callback.
//!
//! "Today" is injected at construction and replaced through [`refresh`] when
//! the day changes, so a session never reads the system clock itself.
//! Nothing here can fail: unknown or malformed dates just end up disabled.
//!
//! [`refresh`]: AvailabilityCalendar::refresh

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use shared::{CalendarCell, CalendarDate, CalendarFocusDate, CalendarMonth, DateStatus};

use super::availability::AvailabilitySet;
use super::calendar::{CalendarService, WEEKDAY_LABELS};

/// Receives the canonical `YYYY-MM-DD` string of a selected date
pub type SelectionCallback = Box<dyn FnMut(String) + Send>;

pub struct AvailabilityCalendar {
    calendar: CalendarService,
    today: CalendarDate,
    availability: Arc<AvailabilitySet>,
    /// `Some` while open
    displayed_month: Option<CalendarFocusDate>,
    on_select: SelectionCallback,
}

impl fmt::Debug for AvailabilityCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailabilityCalendar")
            .field("today", &self.today)
            .field("availability", &self.availability)
            .field("displayed_month", &self.displayed_month)
            .finish_non_exhaustive()
    }
}

impl AvailabilityCalendar {
    /// Create a closed calendar
    pub fn new(
        today: CalendarDate,
        availability: impl Into<Arc<AvailabilitySet>>,
        on_select: impl FnMut(String) + Send + 'static,
    ) -> Self {
        Self {
            calendar: CalendarService::new(),
            today,
            availability: availability.into(),
            displayed_month: None,
            on_select: Box::new(on_select),
        }
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// Move the calendar to a new day. The displayed month is kept.
    pub fn refresh(&mut self, today: CalendarDate, availability: Arc<AvailabilitySet>) {
        if today != self.today {
            info!("📅 Calendar day changed from {} to {}", self.today, today);
        }
        self.today = today;
        self.availability = availability;
    }

    pub fn is_open(&self) -> bool {
        self.displayed_month.is_some()
    }

    /// The displayed month, `None` while closed
    pub fn displayed_month(&self) -> Option<CalendarFocusDate> {
        self.displayed_month
    }

    /// Show the calendar on the month containing today.
    ///
    /// Navigation from a previous session is not remembered.
    pub fn open(&mut self) -> CalendarFocusDate {
        let focus = self.calendar.focus_of(self.today);
        self.displayed_month = Some(focus);
        info!("📅 Calendar opened on {}", self.calendar.month_label(focus));
        focus
    }

    pub fn close(&mut self) {
        if self.displayed_month.take().is_some() {
            info!("📅 Calendar closed");
        }
    }

    /// Step back one month. `None` (and no change) while closed.
    pub fn go_to_previous_month(&mut self) -> Option<CalendarFocusDate> {
        let current = self.displayed_month?;
        Some(self.navigate_to(self.calendar.previous_month(current)))
    }

    /// Step forward one month. `None` (and no change) while closed.
    pub fn go_to_next_month(&mut self) -> Option<CalendarFocusDate> {
        let current = self.displayed_month?;
        Some(self.navigate_to(self.calendar.next_month(current)))
    }

    /// Show `target` unless its grid can't be rendered, in which case the
    /// calendar stays where it is
    fn navigate_to(&mut self, target: CalendarFocusDate) -> CalendarFocusDate {
        if self.calendar.is_renderable(target) {
            self.displayed_month = Some(target);
            debug!("📅 Navigated to {}/{}", target.month, target.year);
        } else {
            warn!("📅 {}/{} is outside the supported date range", target.month, target.year);
        }
        self.reference_month()
    }

    /// The month classification is evaluated against: the displayed month, or
    /// the month `open` would show while closed
    fn reference_month(&self) -> CalendarFocusDate {
        self.displayed_month
            .unwrap_or_else(|| self.calendar.focus_of(self.today))
    }

    pub fn classify(&self, date: CalendarDate) -> DateStatus {
        self.classify_in(date, self.reference_month())
    }

    fn classify_in(&self, date: CalendarDate, month: CalendarFocusDate) -> DateStatus {
        if date == self.today {
            DateStatus::Today
        } else if !self.calendar.is_in_month(date, month) {
            DateStatus::Disabled
        } else if self.availability.is_fully_booked(date) {
            DateStatus::Booked
        } else if self.availability.is_available(date) {
            DateStatus::Available
        } else {
            DateStatus::Disabled
        }
    }

    pub fn is_selectable(&self, date: CalendarDate) -> bool {
        self.is_selectable_in(date, self.reference_month())
    }

    fn is_selectable_in(&self, date: CalendarDate, month: CalendarFocusDate) -> bool {
        match self.classify_in(date, month) {
            DateStatus::Available => true,
            DateStatus::Today => self.availability.is_available(date),
            DateStatus::Booked | DateStatus::Disabled => false,
        }
    }

    /// Select `date` if it is selectable in the open calendar.
    ///
    /// On success the callback receives the canonical date string and the
    /// calendar closes. Otherwise nothing happens. Returns whether the
    /// selection went through.
    pub fn select_date(&mut self, date: CalendarDate) -> bool {
        if !self.is_open() || !self.is_selectable(date) {
            debug!("📅 Ignoring selection of {}", date);
            return false;
        }

        info!("📅 Date selected: {}", date);
        (self.on_select)(date.canonical());
        self.close();
        true
    }

    /// Render `month` with every cell classified against it, `None` if the
    /// month's grid can't be represented
    pub fn month_view(&self, month: CalendarFocusDate) -> Option<CalendarMonth> {
        let cells = self
            .calendar
            .compute_month_view(month)?
            .into_iter()
            .map(|date| CalendarCell {
                date,
                day: date.day(),
                day_type: self.calendar.day_type(date, month),
                status: self.classify_in(date, month),
                selectable: self.is_selectable_in(date, month),
            })
            .collect();

        Some(CalendarMonth {
            month: month.month,
            year: month.year,
            month_label: self.calendar.month_label(month),
            weekday_labels: WEEKDAY_LABELS.iter().map(|label| label.to_string()).collect(),
            first_day_of_week: self.calendar.first_day_of_month(month.month, month.year),
            cells,
        })
    }

    /// Render the displayed month, `None` while closed
    pub fn current_view(&self) -> Option<CalendarMonth> {
        self.displayed_month.and_then(|month| self.month_view(month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CalendarDayType;
    use std::sync::Mutex;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn focus(month: u32, year: i32) -> CalendarFocusDate {
        CalendarFocusDate { month, year }
    }

    /// Calendar plus the list of strings the callback received
    fn create_test_calendar(
        today: &str,
        available: &[&str],
        booked: &[&str],
    ) -> (AvailabilityCalendar, Arc<Mutex<Vec<String>>>) {
        let selections = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&selections);
        let calendar = AvailabilityCalendar::new(
            date(today),
            AvailabilitySet::new(available.iter().copied(), booked.iter().copied()),
            move |selected| sink.lock().unwrap().push(selected),
        );
        (calendar, selections)
    }

    #[test]
    fn test_open_resets_to_today_month() {
        let (mut calendar, _) = create_test_calendar("2025-03-10", &[], &[]);
        assert!(!calendar.is_open());

        assert_eq!(calendar.open(), focus(3, 2025));
        calendar.go_to_next_month();
        calendar.go_to_next_month();
        assert_eq!(calendar.displayed_month(), Some(focus(5, 2025)));

        calendar.close();
        assert_eq!(calendar.displayed_month(), None);

        calendar.open();
        assert_eq!(calendar.displayed_month(), Some(focus(3, 2025)));
    }

    #[test]
    fn test_month_rollover() {
        let (mut calendar, _) = create_test_calendar("2025-12-20", &[], &[]);
        calendar.open();
        assert_eq!(calendar.go_to_next_month(), Some(focus(1, 2026)));

        let (mut calendar, _) = create_test_calendar("2025-01-20", &[], &[]);
        calendar.open();
        assert_eq!(calendar.go_to_previous_month(), Some(focus(12, 2024)));
    }

    #[test]
    fn test_navigation_is_unbounded() {
        let (mut calendar, _) = create_test_calendar("2025-01-20", &[], &[]);
        calendar.open();
        for _ in 0..240 {
            calendar.go_to_previous_month();
        }
        assert_eq!(calendar.displayed_month(), Some(focus(1, 2005)));
    }

    #[test]
    fn test_navigation_while_closed_does_nothing() {
        let (mut calendar, _) = create_test_calendar("2025-01-20", &[], &[]);
        assert_eq!(calendar.go_to_next_month(), None);
        assert!(!calendar.is_open());
    }

    #[test]
    fn test_today_takes_precedence_over_booked() {
        let (mut calendar, _) = create_test_calendar("2025-06-15", &[], &["2025-06-15"]);
        calendar.open();
        assert_eq!(calendar.classify(date("2025-06-15")), DateStatus::Today);
    }

    #[test]
    fn test_today_is_today_even_in_adjacent_month_cell() {
        // April 2025 starts on a Tuesday, so 30 March is a padding cell
        let (mut calendar, _) = create_test_calendar("2025-03-30", &["2025-03-30"], &[]);
        calendar.open();
        calendar.go_to_next_month();

        let view = calendar.current_view().unwrap();
        let cell = view.cells.iter().find(|c| c.date == date("2025-03-30")).unwrap();
        assert_eq!(cell.status, DateStatus::Today);
        assert_eq!(cell.day_type, CalendarDayType::PaddingBefore);
        assert!(cell.selectable);
    }

    #[test]
    fn test_booked_takes_precedence_over_available() {
        let (mut calendar, _) =
            create_test_calendar("2025-03-10", &["2025-03-15"], &["2025-03-15"]);
        calendar.open();
        assert_eq!(calendar.classify(date("2025-03-15")), DateStatus::Booked);
        assert!(!calendar.is_selectable(date("2025-03-15")));
    }

    #[test]
    fn test_adjacent_month_days_are_disabled() {
        let (mut calendar, _) =
            create_test_calendar("2025-03-10", &["2025-02-28", "2025-04-02"], &[]);
        calendar.open();

        let view = calendar.current_view().unwrap();
        for cell in view.cells.iter().filter(|c| c.day_type != CalendarDayType::MonthDay) {
            assert_eq!(cell.status, DateStatus::Disabled, "{}", cell.date);
            assert!(!cell.selectable);
        }
        assert_eq!(calendar.classify(date("2025-02-28")), DateStatus::Disabled);
        assert_eq!(calendar.classify(date("2025-04-02")), DateStatus::Disabled);
    }

    #[test]
    fn test_unlisted_days_are_disabled() {
        let (mut calendar, _) = create_test_calendar("2025-03-10", &[], &[]);
        calendar.open();
        assert_eq!(calendar.classify(date("2025-03-20")), DateStatus::Disabled);
    }

    #[test]
    fn test_today_selectable_only_when_available() {
        let (mut calendar, selections) = create_test_calendar("2025-03-10", &["2025-03-10"], &[]);
        calendar.open();
        assert_eq!(calendar.classify(date("2025-03-10")), DateStatus::Today);
        assert!(calendar.is_selectable(date("2025-03-10")));
        assert!(calendar.select_date(date("2025-03-10")));
        assert_eq!(*selections.lock().unwrap(), vec!["2025-03-10".to_string()]);

        let (mut calendar, selections) = create_test_calendar("2025-03-10", &[], &[]);
        calendar.open();
        assert!(!calendar.select_date(date("2025-03-10")));
        assert!(selections.lock().unwrap().is_empty());
    }

    #[test]
    fn test_callback_fires_iff_selectable() {
        let (mut calendar, selections) = create_test_calendar(
            "2025-03-10",
            &["2025-03-12", "2025-03-15", "2025-04-01"],
            &["2025-03-15"],
        );
        calendar.open();

        for cell in calendar.current_view().unwrap().cells {
            calendar.open();
            let before = selections.lock().unwrap().len();
            let accepted = calendar.select_date(cell.date);
            let fired = selections.lock().unwrap().len() > before;

            assert_eq!(accepted, cell.selectable, "{}", cell.date);
            assert_eq!(fired, cell.selectable, "{}", cell.date);
            if matches!(cell.status, DateStatus::Disabled | DateStatus::Booked) {
                assert!(!fired, "{}", cell.date);
            }
        }
        assert_eq!(*selections.lock().unwrap(), vec!["2025-03-12".to_string()]);
    }

    #[test]
    fn test_select_while_closed_is_ignored() {
        let (mut calendar, selections) = create_test_calendar("2025-03-10", &["2025-03-12"], &[]);
        assert!(calendar.is_selectable(date("2025-03-12")));
        assert!(!calendar.select_date(date("2025-03-12")));
        assert!(selections.lock().unwrap().is_empty());
    }

    #[test]
    fn test_booking_scenario() {
        let (mut calendar, selections) =
            create_test_calendar("2025-03-10", &["2025-03-12", "2025-03-20"], &["2025-03-15"]);

        assert_eq!(calendar.open(), focus(3, 2025));
        assert_eq!(calendar.current_view().unwrap().month_label, "March 2025");

        // Fully booked
        assert!(!calendar.select_date(date("2025-03-15")));
        assert!(calendar.is_open());

        // Today, but not available
        assert!(!calendar.select_date(date("2025-03-10")));
        assert!(calendar.is_open());

        // April 5 is in neither set
        calendar.go_to_next_month();
        assert!(!calendar.select_date(date("2025-04-05")));
        assert!(calendar.is_open());
        assert!(selections.lock().unwrap().is_empty());

        // Back to March, pick the 12th
        calendar.go_to_previous_month();
        assert!(calendar.select_date(date("2025-03-12")));
        assert!(!calendar.is_open());
        assert_eq!(*selections.lock().unwrap(), vec!["2025-03-12".to_string()]);
    }

    #[test]
    fn test_march_12_selectable_straight_after_open() {
        let (mut calendar, selections) =
            create_test_calendar("2025-03-10", &["2025-03-12", "2025-03-20"], &["2025-03-15"]);
        calendar.open();
        assert!(calendar.select_date(date("2025-03-12")));
        assert!(!calendar.is_open());
        assert_eq!(*selections.lock().unwrap(), vec!["2025-03-12".to_string()]);
    }

    #[test]
    fn test_refresh_moves_today() {
        let (mut calendar, selections) = create_test_calendar("2025-03-10", &["2025-03-10"], &[]);
        calendar.open();
        calendar.refresh(date("2025-03-11"), Arc::new(AvailabilitySet::new(["2025-03-12"], Vec::<String>::new())));

        assert_eq!(calendar.today(), date("2025-03-11"));
        assert_eq!(calendar.displayed_month(), Some(focus(3, 2025)));
        assert_eq!(calendar.classify(date("2025-03-10")), DateStatus::Disabled);
        assert_eq!(calendar.classify(date("2025-03-11")), DateStatus::Today);
        assert!(!calendar.select_date(date("2025-03-10")));
        assert!(calendar.select_date(date("2025-03-12")));
        assert_eq!(*selections.lock().unwrap(), vec!["2025-03-12".to_string()]);
    }

    #[test]
    fn test_month_view_cells() {
        let (mut calendar, _) =
            create_test_calendar("2025-03-10", &["2025-03-12", "2025-03-20"], &["2025-03-15"]);
        calendar.open();

        let view = calendar.current_view().unwrap();
        assert_eq!(view.cells.len(), 42);
        assert_eq!(view.first_day_of_week, 6);
        assert_eq!(view.weekday_labels[0], "Sun");

        let statuses: Vec<(u32, DateStatus)> = view
            .cells
            .iter()
            .filter(|c| c.day_type == CalendarDayType::MonthDay && c.status != DateStatus::Disabled)
            .map(|c| (c.day, c.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                (10, DateStatus::Today),
                (12, DateStatus::Available),
                (15, DateStatus::Booked),
                (20, DateStatus::Available),
            ]
        );
    }
}
