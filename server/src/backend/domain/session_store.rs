//! Per-visitor calendar sessions.
//!
//! Every visitor gets their own date picker and inquiry draft, keyed by an
//! opaque session id. Sessions idle for longer than the timeout are dropped.
//! Each access moves the session's calendar to the clock's current day.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::{debug, info};
use shared::CalendarDate;

use super::availability::{AvailabilitySet, AvailabilitySource};
use super::availability_calendar::AvailabilityCalendar;
use super::clock::Clock;
use super::inquiry::InquiryDraft;
use super::lock;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct CalendarSession {
    widget: AvailabilityCalendar,
    draft: Arc<Mutex<InquiryDraft>>,
    last_seen: Instant,
}

pub struct SessionStore {
    clock: Arc<dyn Clock>,
    availability: AvailabilitySource,
    idle_timeout: Duration,
    sessions: Mutex<HashMap<String, CalendarSession>>,
}

impl SessionStore {
    pub fn new(clock: Arc<dyn Clock>, availability: AvailabilitySource, idle_timeout: Duration) -> Self {
        Self {
            clock,
            availability,
            idle_timeout,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// Today together with the availability resolved for it
    pub fn current_availability(&self) -> (CalendarDate, Arc<AvailabilitySet>) {
        let today = self.today();
        (today, self.availability.for_day(today))
    }

    /// Run `f` against the calendar of session `id`, creating a closed one if
    /// the session is new or has expired
    pub fn with_calendar<R>(&self, id: &str, f: impl FnOnce(&mut AvailabilityCalendar) -> R) -> R {
        let now = Instant::now();
        let (today, availability) = self.current_availability();

        let mut sessions = lock(&self.sessions);
        self.evict_expired(&mut sessions, now);

        let session = sessions.entry(id.to_string()).or_insert_with(|| {
            debug!("New calendar session {}", id);
            let draft = Arc::new(Mutex::new(InquiryDraft::default()));
            let consumer = Arc::clone(&draft);
            let widget = AvailabilityCalendar::new(today, Arc::clone(&availability), move |raw| {
                lock(&consumer).set_hike_date(&raw);
            });
            CalendarSession {
                widget,
                draft,
                last_seen: now,
            }
        });

        session.last_seen = now;
        session.widget.refresh(today, availability);
        f(&mut session.widget)
    }

    /// Inquiry draft of session `id`. Unknown sessions have none.
    pub fn draft(&self, id: &str) -> Option<Arc<Mutex<InquiryDraft>>> {
        let now = Instant::now();
        let mut sessions = lock(&self.sessions);
        self.evict_expired(&mut sessions, now);

        sessions.get_mut(id).map(|session| {
            session.last_seen = now;
            Arc::clone(&session.draft)
        })
    }

    /// Drop sessions idle for longer than the timeout as of `now`
    pub fn evict_idle(&self, now: Instant) -> usize {
        self.evict_expired(&mut lock(&self.sessions), now)
    }

    fn evict_expired(&self, sessions: &mut HashMap<String, CalendarSession>, now: Instant) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| now.saturating_duration_since(session.last_seen) <= self.idle_timeout);

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle calendar sessions", evicted);
        }
        evicted
    }
}
