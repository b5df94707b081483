//! Availability data behind the booking calendar.
//!
//! The content backend hands us individual dates and inclusive date ranges
//! for both "available" and "fully booked". This module flattens them into an
//! [`AvailabilitySet`] keyed by canonical `YYYY-MM-DD` string, drops dates that
//! are already in the past and substitutes defaults when a list is empty.
//!
//! Entries that are not valid dates are kept verbatim. They never equal a
//! rendered day, so they simply never make anything selectable; callers are
//! expected to supply `YYYY-MM-DD` strings.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};
use shared::{CalendarContent, CalendarDate, DateRangeEntry, HelpInfo, ResolvedHelpInfo};

use super::lock;

pub const DEFAULT_HELP_TITLE: &str = "Need Help?";
pub const DEFAULT_HELP_DESCRIPTION: &str =
    "Contact us directly for availability confirmation and booking assistance.";

const DEFAULT_AVAILABLE_OFFSET_DAYS: i64 = 3;
const DEFAULT_AVAILABLE_DAYS: i64 = 30;
const DEFAULT_BOOKED_OFFSET_DAYS: i64 = 5;
const DEFAULT_BOOKED_DAYS: i64 = 5;

/// Available and fully booked dates for one calendar session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilitySet {
    available: HashSet<String>,
    fully_booked: HashSet<String>,
}

impl AvailabilitySet {
    pub fn new(
        available: impl IntoIterator<Item = impl Into<String>>,
        fully_booked: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            available: available.into_iter().map(Into::into).collect(),
            fully_booked: fully_booked.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_available(&self, date: CalendarDate) -> bool {
        self.available.contains(&date.canonical())
    }

    pub fn is_fully_booked(&self, date: CalendarDate) -> bool {
        self.fully_booked.contains(&date.canonical())
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn fully_booked_count(&self) -> usize {
        self.fully_booked.len()
    }

    /// Dates listed as both available and fully booked, sorted
    pub fn overlapping(&self) -> Vec<String> {
        let mut overlap: Vec<String> = self
            .available
            .intersection(&self.fully_booked)
            .cloned()
            .collect();
        overlap.sort();
        overlap
    }

    /// Defaults used when the content backend has nothing to say
    pub fn defaults(today: CalendarDate) -> Self {
        Self {
            available: default_available(today),
            fully_booked: default_fully_booked(today),
        }
    }

    /// Build the set from content-managed calendar data.
    ///
    /// Each list is the union of its individual dates and the days of its
    /// ranges. A list with no entries at all falls back to the defaults.
    /// Dates before `today` are removed afterwards.
    pub fn from_content(content: Option<&CalendarContent>, today: CalendarDate) -> Self {
        let empty = CalendarContent::default();
        let content = content.unwrap_or(&empty);

        let available = if has_entries(&content.available_dates, &content.available_date_ranges) {
            collect_dates(
                content.available_dates.as_deref(),
                content.available_date_ranges.as_deref(),
                today,
            )
        } else {
            info!("No available dates in content, using defaults");
            default_available(today)
        };

        let fully_booked =
            if has_entries(&content.fully_booked_dates, &content.fully_booked_date_ranges) {
                collect_dates(
                    content.fully_booked_dates.as_deref(),
                    content.fully_booked_date_ranges.as_deref(),
                    today,
                )
            } else {
                info!("No fully booked dates in content, using defaults");
                default_fully_booked(today)
            };

        let set = Self { available, fully_booked };
        let overlap = set.overlapping();
        if !overlap.is_empty() {
            info!(
                "{} dates are both available and fully booked, booked wins: {:?}",
                overlap.len(),
                overlap
            );
        }
        info!(
            "Availability loaded: {} available, {} fully booked",
            set.available_count(),
            set.fully_booked_count()
        );
        set
    }
}

fn has_entries(dates: &Option<Vec<String>>, ranges: &Option<Vec<DateRangeEntry>>) -> bool {
    dates.as_ref().is_some_and(|d| !d.is_empty()) || ranges.as_ref().is_some_and(|r| !r.is_empty())
}

fn consecutive_days(today: CalendarDate, offset: i64, count: i64) -> HashSet<String> {
    (offset..offset + count)
        .filter_map(|days| today.add_days(days))
        .map(|date| date.canonical())
        .collect()
}

fn default_available(today: CalendarDate) -> HashSet<String> {
    consecutive_days(today, DEFAULT_AVAILABLE_OFFSET_DAYS, DEFAULT_AVAILABLE_DAYS)
}

fn default_fully_booked(today: CalendarDate) -> HashSet<String> {
    consecutive_days(today, DEFAULT_BOOKED_OFFSET_DAYS, DEFAULT_BOOKED_DAYS)
}

/// Normalize one content entry.
///
/// Full timestamps are cut down to their date part. Anything that still
/// isn't a date comes back verbatim as `Err`.
fn normalize_entry(raw: &str) -> Result<CalendarDate, String> {
    let trimmed = raw.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    CalendarDate::parse(date_part).ok_or_else(|| trimmed.to_string())
}

/// Every day of an inclusive range, `None` if the range is unusable
fn expand_range(range: &DateRangeEntry) -> Option<Vec<CalendarDate>> {
    let start = normalize_entry(range.start_date.as_deref()?).ok()?;
    let end = normalize_entry(range.end_date.as_deref()?).ok()?;
    if end < start {
        return None;
    }

    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        current = current.add_days(1)?;
    }
    Some(days)
}

fn collect_dates(
    individual: Option<&[String]>,
    ranges: Option<&[DateRangeEntry]>,
    today: CalendarDate,
) -> HashSet<String> {
    let mut dates = HashSet::new();
    let mut past = 0usize;

    for raw in individual.unwrap_or_default() {
        if raw.trim().is_empty() {
            continue;
        }
        match normalize_entry(raw) {
            Ok(date) if date < today => past += 1,
            Ok(date) => {
                dates.insert(date.canonical());
            }
            Err(verbatim) => {
                warn!("Calendar entry '{}' is not a YYYY-MM-DD date, it will never match", verbatim);
                dates.insert(verbatim);
            }
        }
    }

    for range in ranges.unwrap_or_default() {
        match expand_range(range) {
            Some(days) => {
                for date in days {
                    if date < today {
                        past += 1;
                    } else {
                        dates.insert(date.canonical());
                    }
                }
            }
            None => warn!(
                "Skipping unusable date range {:?} to {:?}",
                range.start_date, range.end_date
            ),
        }
    }

    if past > 0 {
        debug!("Dropped {} past dates", past);
    }
    dates
}

/// Content-managed calendar data, resolved into an [`AvailabilitySet`] for
/// whichever day it is asked about.
///
/// Past-date pruning and the default windows both depend on today, so the
/// set is rebuilt whenever the day changes. The last day's set is cached.
#[derive(Debug, Default)]
pub struct AvailabilitySource {
    content: Option<CalendarContent>,
    resolved: Mutex<Option<(CalendarDate, Arc<AvailabilitySet>)>>,
}

impl AvailabilitySource {
    pub fn new(content: Option<CalendarContent>) -> Self {
        Self {
            content,
            resolved: Mutex::new(None),
        }
    }

    pub fn for_day(&self, today: CalendarDate) -> Arc<AvailabilitySet> {
        let mut resolved = lock(&self.resolved);
        if let Some((day, set)) = resolved.as_ref() {
            if *day == today {
                return Arc::clone(set);
            }
        }

        info!("Resolving availability for {}", today);
        let set = Arc::new(AvailabilitySet::from_content(self.content.as_ref(), today));
        *resolved = Some((today, Arc::clone(&set)));
        set
    }
}

/// Apply display defaults to content-managed help text
pub fn resolve_help_info(info: Option<&HelpInfo>) -> ResolvedHelpInfo {
    let non_empty = |value: Option<&String>| value.filter(|v| !v.trim().is_empty()).cloned();
    let info = info.cloned().unwrap_or_default();
    ResolvedHelpInfo {
        title: non_empty(info.title.as_ref()).unwrap_or_else(|| DEFAULT_HELP_TITLE.to_string()),
        description: non_empty(info.description.as_ref())
            .unwrap_or_else(|| DEFAULT_HELP_DESCRIPTION.to_string()),
        phone: non_empty(info.phone.as_ref()),
        email: non_empty(info.email.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn range(start: &str, end: &str) -> DateRangeEntry {
        DateRangeEntry {
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        }
    }

    #[test]
    fn test_membership_by_canonical_string() {
        let set = AvailabilitySet::new(["2025-03-12"], ["2025-03-15"]);

        assert!(set.is_available(date("2025-03-12")));
        assert!(!set.is_available(date("2025-03-15")));
        assert!(set.is_fully_booked(date("2025-03-15")));
        assert!(set.overlapping().is_empty());
    }

    #[test]
    fn test_malformed_entries_never_match() {
        let set = AvailabilitySet::new(["2025-3-12", "garbage"], Vec::<String>::new());

        assert!(!set.is_available(date("2025-03-12")));
        assert_eq!(set.available_count(), 2);
    }

    #[test]
    fn test_overlapping_reports_dates_in_both_sets() {
        let set = AvailabilitySet::new(["2025-03-12", "2025-03-13"], ["2025-03-13"]);
        assert_eq!(set.overlapping(), vec!["2025-03-13".to_string()]);
    }

    #[test]
    fn test_defaults_relative_to_today() {
        let today = date("2025-03-10");
        let set = AvailabilitySet::defaults(today);

        assert_eq!(set.available_count(), 30);
        assert_eq!(set.fully_booked_count(), 5);
        assert!(!set.is_available(date("2025-03-12")));
        assert!(set.is_available(date("2025-03-13")));
        assert!(set.is_available(date("2025-04-11")));
        assert!(!set.is_available(date("2025-04-12")));
        assert!(set.is_fully_booked(date("2025-03-15")));
        assert!(set.is_fully_booked(date("2025-03-19")));
        assert!(!set.is_fully_booked(date("2025-03-20")));
    }

    #[test]
    fn test_from_content_without_content_uses_defaults() {
        let today = date("2025-03-10");
        assert_eq!(AvailabilitySet::from_content(None, today), AvailabilitySet::defaults(today));
    }

    #[test]
    fn test_from_content_merges_dates_and_ranges() {
        let today = date("2025-03-10");
        let content = CalendarContent {
            available_dates: Some(vec!["2025-03-12".to_string()]),
            available_date_ranges: Some(vec![range("2025-03-30", "2025-04-02")]),
            fully_booked_dates: Some(vec!["2025-03-15".to_string()]),
            ..Default::default()
        };

        let set = AvailabilitySet::from_content(Some(&content), today);

        assert_eq!(set.available_count(), 5);
        assert!(set.is_available(date("2025-03-12")));
        assert!(set.is_available(date("2025-03-31")));
        assert!(set.is_available(date("2025-04-02")));
        assert_eq!(set.fully_booked_count(), 1);
        assert!(set.is_fully_booked(date("2025-03-15")));
    }

    #[test]
    fn test_from_content_drops_past_dates_but_keeps_today() {
        let today = date("2025-03-10");
        let content = CalendarContent {
            available_dates: Some(vec!["2025-03-09".to_string(), "2025-03-10".to_string()]),
            available_date_ranges: Some(vec![range("2025-03-08", "2025-03-11")]),
            fully_booked_dates: Some(vec!["2025-03-20".to_string()]),
            ..Default::default()
        };

        let set = AvailabilitySet::from_content(Some(&content), today);

        assert!(!set.is_available(date("2025-03-09")));
        assert!(set.is_available(date("2025-03-10")));
        assert!(set.is_available(date("2025-03-11")));
        assert_eq!(set.available_count(), 2);
    }

    #[test]
    fn test_from_content_normalizes_timestamps() {
        let today = date("2025-03-10");
        let content = CalendarContent {
            available_dates: Some(vec!["2025-03-12T00:00:00.000Z".to_string()]),
            fully_booked_dates: Some(vec!["2025-03-15".to_string()]),
            ..Default::default()
        };

        let set = AvailabilitySet::from_content(Some(&content), today);
        assert!(set.is_available(date("2025-03-12")));
    }

    #[test]
    fn test_from_content_skips_unusable_ranges() {
        let today = date("2025-03-10");
        let content = CalendarContent {
            available_date_ranges: Some(vec![
                range("2025-03-20", "2025-03-18"),
                DateRangeEntry { start_date: Some("2025-03-20".to_string()), end_date: None },
                range("2025-03-21", "2025-03-21"),
            ]),
            fully_booked_dates: Some(vec!["2025-03-15".to_string()]),
            ..Default::default()
        };

        let set = AvailabilitySet::from_content(Some(&content), today);
        assert_eq!(set.available_count(), 1);
        assert!(set.is_available(date("2025-03-21")));
    }

    #[test]
    fn test_from_content_falls_back_per_list() {
        let today = date("2025-03-10");
        let content = CalendarContent {
            available_dates: Some(vec!["2025-03-12".to_string()]),
            fully_booked_dates: Some(Vec::new()),
            ..Default::default()
        };

        let set = AvailabilitySet::from_content(Some(&content), today);
        assert_eq!(set.available_count(), 1);
        assert_eq!(set.fully_booked_count(), 5);
    }

    #[test]
    fn test_source_rebuilds_when_the_day_changes() {
        let content = CalendarContent {
            available_dates: Some(vec!["2025-03-10".to_string(), "2025-03-12".to_string()]),
            ..Default::default()
        };
        let source = AvailabilitySource::new(Some(content));

        let monday = source.for_day(date("2025-03-10"));
        assert!(monday.is_available(date("2025-03-10")));
        assert!(monday.is_fully_booked(date("2025-03-15")));
        assert!(Arc::ptr_eq(&monday, &source.for_day(date("2025-03-10"))));

        // A day later the 10th is in the past and the booked defaults move along
        let tuesday = source.for_day(date("2025-03-11"));
        assert!(!tuesday.is_available(date("2025-03-10")));
        assert!(tuesday.is_available(date("2025-03-12")));
        assert!(!tuesday.is_fully_booked(date("2025-03-15")));
        assert!(tuesday.is_fully_booked(date("2025-03-16")));
    }

    #[test]
    fn test_help_info_defaults() {
        let resolved = resolve_help_info(None);
        assert_eq!(resolved.title, DEFAULT_HELP_TITLE);
        assert_eq!(resolved.description, DEFAULT_HELP_DESCRIPTION);
        assert_eq!(resolved.phone, None);

        let info = HelpInfo {
            title: Some("  ".to_string()),
            description: Some("Call the farm".to_string()),
            phone: Some("073 593 4007".to_string()),
            email: None,
        };
        let resolved = resolve_help_info(Some(&info));
        assert_eq!(resolved.title, DEFAULT_HELP_TITLE);
        assert_eq!(resolved.description, "Call the farm");
        assert_eq!(resolved.phone.as_deref(), Some("073 593 4007"));
    }
}
