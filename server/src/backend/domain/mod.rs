//! # Domain Module
//!
//! Business logic for the trail booking calendar.
//!
//! - **calendar**: civil-calendar arithmetic and the 42-cell month grid
//! - **availability**: available / fully booked date sets built from content
//! - **availability_calendar**: the date picker widget (open, navigate, classify, select)
//! - **clock**: where "today" comes from
//! - **session_store**: one date picker and inquiry draft per visitor
//! - **booking_calendar_service**: the calendar sessions the UI talks to
//! - **inquiry**: booking inquiry validation and the spreadsheet row format
//! - **inquiry_service**: submitting inquiries to the configured sink

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod calendar;
pub mod availability;
pub mod availability_calendar;
pub mod clock;
pub mod session_store;
pub mod booking_calendar_service;
pub mod inquiry;
pub mod inquiry_service;

pub use calendar::*;
pub use availability::*;
pub use availability_calendar::*;
pub use clock::*;
pub use session_store::*;
pub use booking_calendar_service::*;
pub use inquiry::*;
pub use inquiry_service::*;

/// Lock a mutex, carrying on with the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
