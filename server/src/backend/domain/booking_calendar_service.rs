//! Calendar sessions for the HTTP layer.
//!
//! Every visitor talks to their own date picker, identified by a session id.
//! This service routes requests to the right session in the shared
//! [`SessionStore`] and translates widget state into the DTOs the UI consumes.

use std::sync::Arc;

use log::info;
use shared::{
    CalendarDate, CalendarFocusDate, CalendarMonth, CalendarSessionResponse, CurrentDateResponse, HikeDate,
    ResolvedHelpInfo, SelectDateResponse,
};

use super::availability_calendar::AvailabilityCalendar;
use super::calendar::CalendarService;
use super::lock;
use super::session_store::SessionStore;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CalendarError {
    #[error("Calendar is not open")]
    NotOpen,
    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),
    #[error("{month}/{year} is outside the supported date range")]
    OutOfRange { month: u32, year: i32 },
}

#[derive(Clone)]
pub struct BookingCalendarService {
    calendar: CalendarService,
    sessions: Arc<SessionStore>,
    help_info: ResolvedHelpInfo,
}

impl BookingCalendarService {
    pub fn new(sessions: Arc<SessionStore>, help_info: ResolvedHelpInfo) -> Self {
        Self {
            calendar: CalendarService::new(),
            sessions,
            help_info,
        }
    }

    pub fn session(&self, session_id: &str) -> CalendarSessionResponse {
        self.sessions.with_calendar(session_id, |widget| CalendarSessionResponse {
            is_open: widget.is_open(),
            focus_date: widget.displayed_month(),
            today: widget.today(),
        })
    }

    /// Open on today's month and render it
    pub fn open(&self, session_id: &str) -> Result<CalendarMonth, CalendarError> {
        self.sessions.with_calendar(session_id, |widget| {
            let focus = widget.open();
            widget.month_view(focus).ok_or(CalendarError::OutOfRange {
                month: focus.month,
                year: focus.year,
            })
        })
    }

    pub fn close(&self, session_id: &str) -> CalendarSessionResponse {
        self.sessions.with_calendar(session_id, |widget| widget.close());
        self.session(session_id)
    }

    /// Render the displayed month
    pub fn current_month(&self, session_id: &str) -> Result<CalendarMonth, CalendarError> {
        self.sessions
            .with_calendar(session_id, |widget| widget.current_view())
            .ok_or(CalendarError::NotOpen)
    }

    /// Render any month for today's availability, outside of any session
    pub fn preview_month(&self, month: u32, year: i32) -> Result<CalendarMonth, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }

        let (today, availability) = self.sessions.current_availability();
        AvailabilityCalendar::new(today, availability, |_| {})
            .month_view(CalendarFocusDate { month, year })
            .ok_or(CalendarError::OutOfRange { month, year })
    }

    pub fn navigate_previous_month(&self, session_id: &str) -> Result<CalendarFocusDate, CalendarError> {
        self.sessions
            .with_calendar(session_id, |widget| widget.go_to_previous_month())
            .ok_or(CalendarError::NotOpen)
    }

    pub fn navigate_next_month(&self, session_id: &str) -> Result<CalendarFocusDate, CalendarError> {
        self.sessions
            .with_calendar(session_id, |widget| widget.go_to_next_month())
            .ok_or(CalendarError::NotOpen)
    }

    /// Try to select `raw`. Anything that isn't a selectable canonical date
    /// is ignored.
    pub fn select_date(&self, session_id: &str, raw: &str) -> SelectDateResponse {
        let accepted = match CalendarDate::parse(raw.trim()) {
            Some(date) => self.sessions.with_calendar(session_id, |widget| widget.select_date(date)),
            None => false,
        };

        if accepted {
            let hike_date = self.hike_date(session_id);
            let message = match &hike_date {
                Some(hike) => format!("Hike date set to {}", hike.formatted),
                None => "Hike date set".to_string(),
            };
            SelectDateResponse {
                accepted,
                hike_date,
                message,
            }
        } else {
            info!("📅 Selection of '{}' ignored", raw);
            SelectDateResponse {
                accepted,
                hike_date: None,
                message: format!("{} is not available for booking", raw),
            }
        }
    }

    pub fn current_date(&self) -> CurrentDateResponse {
        let today = self.sessions.today();
        CurrentDateResponse {
            month: today.month(),
            year: today.year(),
            day: today.day(),
            formatted_date: self.calendar.format_date_for_display(today),
            iso_date: today.canonical(),
        }
    }

    pub fn help_info(&self) -> ResolvedHelpInfo {
        self.help_info.clone()
    }

    /// The date the visitor picked, if any
    pub fn hike_date(&self, session_id: &str) -> Option<HikeDate> {
        let draft = self.sessions.draft(session_id)?;
        let hike_date = lock(&draft).hike_date.clone();
        hike_date
    }

    pub fn month_label(&self, focus: CalendarFocusDate) -> String {
        self.calendar.month_label(focus)
    }
}
