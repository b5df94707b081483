use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::{BookingInquiryRequest, CalendarDate, HikeDate};

use super::calendar::CalendarService;

/// Build the form's view of a selected date from its canonical string
pub fn hike_date_from_raw(raw: &str) -> Option<HikeDate> {
    let date = CalendarDate::parse(raw)?;
    Some(HikeDate {
        raw: date.canonical(),
        formatted: CalendarService::new().format_date_for_display(date),
    })
}

/// Contact form state the calendar writes into
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InquiryDraft {
    pub hike_date: Option<HikeDate>,
}

impl InquiryDraft {
    pub fn set_hike_date(&mut self, raw: &str) {
        self.hike_date = hike_date_from_raw(raw);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One spreadsheet row, keyed the way the sheet's columns are named
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InquiryRecord {
    #[serde(rename = "Date of Enquiry")]
    pub date_of_enquiry: String,
    #[serde(rename = "Full Name")]
    pub full_name: String,
    #[serde(rename = "Email Address")]
    pub email_address: String,
    /// Display form ("March 12, 2025") so spreadsheets keep it as text
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Group Size")]
    pub group_size: String,
    #[serde(rename = "Experience")]
    pub experience: String,
    #[serde(rename = "Message")]
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error("Full name is required")]
    MissingName,
    #[error("Email address is required")]
    MissingEmail,
    #[error("Email address '{0}' is not valid")]
    InvalidEmail(String),
    #[error("Hike date '{0}' is not a YYYY-MM-DD date")]
    InvalidHikeDate(String),
    #[error("Inquiry endpoint is not configured")]
    NotConfigured,
    #[error("Inquiry endpoint rejected the submission: {0}")]
    Upstream(String),
    #[error("Failed to reach inquiry endpoint: {0}")]
    Transport(String),
}

impl InquiryError {
    /// Whether the visitor can fix this by editing the form
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingName | Self::MissingEmail | Self::InvalidEmail(_) | Self::InvalidHikeDate(_)
        )
    }
}

/// Validate a submitted form and turn it into a spreadsheet row.
///
/// The hike date comes from the request when present, otherwise from the
/// date picked in the calendar.
pub fn build_record(
    request: &BookingInquiryRequest,
    selected: Option<&HikeDate>,
    submitted_at: NaiveDateTime,
) -> Result<InquiryRecord, InquiryError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(InquiryError::MissingName);
    }

    let email = request.email.trim();
    if email.is_empty() {
        return Err(InquiryError::MissingEmail);
    }
    if !email.contains('@') {
        return Err(InquiryError::InvalidEmail(email.to_string()));
    }

    let start_date = match request.hike_date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => hike_date_from_raw(raw)
            .ok_or_else(|| InquiryError::InvalidHikeDate(raw.to_string()))?
            .formatted,
        _ => selected.map(|hike| hike.formatted.clone()).unwrap_or_default(),
    };

    Ok(InquiryRecord {
        date_of_enquiry: submitted_at.format("%m/%d/%Y, %H:%M").to_string(),
        full_name: name.to_string(),
        email_address: email.to_string(),
        start_date,
        phone_number: request.phone.trim().to_string(),
        group_size: request.group_size.clone(),
        experience: request.experience.clone(),
        message: request.message.clone(),
    })
}
