//! Shared fixtures for backend tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::{CalendarContent, CalendarDate};

use crate::backend::domain::{
    lock, resolve_help_info, AvailabilitySource, BookingCalendarService, Clock, FixedClock,
    InquiryError, InquiryRecord, InquiryService, SessionStore, DEFAULT_IDLE_TIMEOUT,
};
use crate::backend::storage::InquirySink;
use crate::backend::AppState;

/// Sink that remembers what it was given, or fails when told to
#[derive(Default)]
pub struct RecordingSink {
    pub records: Mutex<Vec<InquiryRecord>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn recorded(&self) -> Vec<InquiryRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl InquirySink for RecordingSink {
    async fn submit(&self, record: &InquiryRecord) -> Result<(), InquiryError> {
        if self.fail {
            return Err(InquiryError::Upstream("500 Internal Server Error".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Clock the test moves by hand
pub struct ManualClock(Mutex<CalendarDate>);

impl ManualClock {
    pub fn new(today: CalendarDate) -> Self {
        Self(Mutex::new(today))
    }

    pub fn set(&self, today: CalendarDate) {
        *lock(&self.0) = today;
    }
}

impl Clock for ManualClock {
    fn today(&self) -> CalendarDate {
        *lock(&self.0)
    }
}

/// The 12th and 20th of March 2025 are available, the 15th is fully booked
pub fn scenario_content() -> CalendarContent {
    CalendarContent {
        available_dates: Some(vec!["2025-03-12".to_string(), "2025-03-20".to_string()]),
        fully_booked_dates: Some(vec!["2025-03-15".to_string()]),
        ..Default::default()
    }
}

/// State for the booking scenario with `clock` as the calendar's clock
pub fn create_test_state_with_clock(sink: Arc<RecordingSink>, clock: Arc<dyn Clock>) -> AppState {
    let sessions = Arc::new(SessionStore::new(
        clock,
        AvailabilitySource::new(Some(scenario_content())),
        DEFAULT_IDLE_TIMEOUT,
    ));
    AppState {
        calendar_service: BookingCalendarService::new(Arc::clone(&sessions), resolve_help_info(None)),
        inquiry_service: InquiryService::new(sink, sessions),
    }
}

/// State for the booking scenario on 2025-03-10
pub fn create_test_state(sink: Arc<RecordingSink>) -> AppState {
    let today = CalendarDate::parse("2025-03-10").unwrap();
    create_test_state_with_clock(sink, Arc::new(FixedClock(today)))
}
