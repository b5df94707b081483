use std::sync::Arc;

use chrono::NaiveDateTime;
use log::{info, warn};
use shared::BookingInquiryRequest;

use super::inquiry::{build_record, InquiryError, InquiryRecord};
use super::lock;
use super::session_store::SessionStore;
use crate::backend::storage::InquirySink;

/// Validates booking inquiries and hands them to the configured sink
#[derive(Clone)]
pub struct InquiryService {
    sink: Arc<dyn InquirySink>,
    sessions: Arc<SessionStore>,
}

impl InquiryService {
    pub fn new(sink: Arc<dyn InquirySink>, sessions: Arc<SessionStore>) -> Self {
        Self { sink, sessions }
    }

    /// Submit an inquiry received at `submitted_at`.
    ///
    /// Without a hike date in the request, the date picked in session
    /// `session_id` is used. That session's draft is cleared only once the
    /// sink has accepted the row.
    pub async fn submit(
        &self,
        session_id: Option<&str>,
        request: BookingInquiryRequest,
        submitted_at: NaiveDateTime,
    ) -> Result<InquiryRecord, InquiryError> {
        let draft = session_id.and_then(|id| self.sessions.draft(id));
        let selected = draft.as_ref().and_then(|draft| lock(draft).hike_date.clone());

        let record = build_record(&request, selected.as_ref(), submitted_at).map_err(|e| {
            warn!("Rejected inquiry: {}", e);
            e
        })?;

        self.sink.submit(&record).await?;

        if let Some(draft) = &draft {
            lock(draft).reset();
        }
        info!("Inquiry submitted for start date '{}'", record.start_date);
        Ok(record)
    }
}
