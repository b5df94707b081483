use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use chrono::{Datelike, Duration, NaiveDate};

/// A civil calendar day (no time of day, no timezone).
///
/// Always travels as its canonical `YYYY-MM-DD` string. Two dates are equal
/// exactly when their canonical strings are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its parts, `None` if the day does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a canonical `YYYY-MM-DD` string.
    ///
    /// Unpadded or otherwise non-canonical spellings (`2025-3-5`) are rejected so
    /// that a parsed date always formats back to the exact input.
    pub fn parse(value: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().map(Self)?;
        if date.canonical() == value {
            Some(date)
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// The date `days` away from this one, `None` outside chrono's range
    pub fn add_days(&self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(days)).map(Self)
    }

    pub fn canonical(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Returned when a string is not a canonical `YYYY-MM-DD` date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCalendarDate(pub String);

impl fmt::Display for InvalidCalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid date '{}'. Expected YYYY-MM-DD", self.0)
    }
}

impl std::error::Error for InvalidCalendarDate {}

impl FromStr for CalendarDate {
    type Err = InvalidCalendarDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidCalendarDate(s.to_string()))
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = InvalidCalendarDate;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.canonical()
    }
}

/// Status of a single calendar cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStatus {
    Today,
    Available,
    Booked,
    Disabled,
}

/// Position of a cell relative to the displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarDayType {
    /// Trailing day of the previous month
    PaddingBefore,
    /// Day within the displayed month
    MonthDay,
    /// Leading day of the next month
    PaddingAfter,
}

/// One rendered cell of the 6x7 month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarCell {
    pub date: CalendarDate,
    pub day: u32,
    pub day_type: CalendarDayType,
    pub status: DateStatus,
    pub selectable: bool,
}

/// A rendered month: always 42 cells, Sunday first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    /// e.g. "March 2025"
    pub month_label: String,
    pub weekday_labels: Vec<String>,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
    pub cells: Vec<CalendarCell>,
}

/// The month currently shown by an open calendar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarFocusDate {
    pub month: u32,
    pub year: i32,
}

/// Response after navigating the calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCalendarFocusResponse {
    pub focus_date: CalendarFocusDate,
    pub success_message: String,
}

/// Open/closed state of the calendar widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarSessionResponse {
    pub is_open: bool,
    /// `None` while the widget is closed
    pub focus_date: Option<CalendarFocusDate>,
    pub today: CalendarDate,
}

/// Response for the current date API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: i32,
    pub day: u32,
    pub formatted_date: String,
    pub iso_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectDateRequest {
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectDateResponse {
    /// False when the date was not selectable and nothing happened
    pub accepted: bool,
    pub hike_date: Option<HikeDate>,
    pub message: String,
}

/// The date a visitor picked for their hike, as the inquiry form keeps it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HikeDate {
    /// Canonical `YYYY-MM-DD`
    pub raw: String,
    /// e.g. "March 12, 2025"
    pub formatted: String,
}

/// Help text shown underneath the calendar, as stored in the content backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HelpInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Help text with defaults applied, ready to display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedHelpInfo {
    pub title: String,
    pub description: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Inclusive date range as entered in the content backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeEntry {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Calendar availability section of the content backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarContent {
    pub available_dates: Option<Vec<String>>,
    pub available_date_ranges: Option<Vec<DateRangeEntry>>,
    pub fully_booked_dates: Option<Vec<String>>,
    pub fully_booked_date_ranges: Option<Vec<DateRangeEntry>>,
    pub help_info: Option<HelpInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormContent {
    pub calendar: Option<CalendarContent>,
}

/// The slice of homepage content this service reads
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HomepageContent {
    pub contact_form: Option<ContactFormContent>,
}

/// Booking inquiry as submitted by the contact form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingInquiryRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Canonical date; falls back to the date picked in the calendar
    pub hike_date: Option<String>,
    pub group_size: String,
    pub experience: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingInquiryResponse {
    pub success: bool,
    pub message: String,
}
