use std::ops::Range;

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RELATIVE_DATE_RE: Regex = Regex::new(
        r"(?i)\b(today|tomorrow|yesterday|next week|next month|next year|last week|last month)\b"
    )
    .unwrap();
    static ref MONTH_DATE_RE: Regex = Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?"
    )
    .unwrap();
    static ref ISO_DATE_RE: Regex = Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap();
    static ref NUMERIC_DATE_RE: Regex =
        Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})\b").unwrap();
    static ref TIME_RE: Regex = Regex::new(r"(?i)\b(\d{1,2}):(\d{2})\s*(am|pm)?\b").unwrap();
    static ref HOUR_RE: Regex = Regex::new(r"(?i)\b(\d{1,2})\s*(am|pm)\b").unwrap();
}

/// Parses a natural language date expression, resolving relative expressions
/// against the current local time.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    parse_date_at(text, Local::now().naive_local())
}

/// Same as [`parse_date`] but resolves relative expressions against the given
/// reference time. The result always falls on midnight of the resolved day.
pub fn parse_date_at(text: &str, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    let midnight = reference.date().and_hms_opt(0, 0, 0)?;
    match normalized.as_str() {
        "today" => return Some(midnight),
        "tomorrow" => return Some(midnight + Duration::days(1)),
        "yesterday" => return Some(midnight - Duration::days(1)),
        _ => {}
    }
    if normalized.contains("next week") {
        return Some(midnight + Duration::weeks(1));
    }
    if normalized.contains("next month") {
        return midnight.checked_add_months(Months::new(1));
    }
    if normalized.contains("next year") {
        return midnight.checked_add_months(Months::new(12));
    }
    if normalized.contains("last week") {
        return Some(midnight - Duration::weeks(1));
    }
    if normalized.contains("last month") {
        return midnight.checked_sub_months(Months::new(1));
    }
    let date = parse_explicit_date(&normalized, reference.date())?;
    date.and_hms_opt(0, 0, 0)
}

fn parse_explicit_date(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    for format in &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%m-%d-%Y", "%m-%d-%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    if let Some(captures) = MONTH_DATE_RE.captures(text) {
        let month = month_number(captures.get(1)?.as_str())?;
        let day: u32 = captures.get(2)?.as_str().parse().ok()?;
        let year: i32 = match captures.get(3) {
            Some(year) => year.as_str().parse().ok()?,
            None => reference.year(),
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    None
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect();
    match prefix.to_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// Parses a time expression like "15:30", "3:30 pm" or "5pm".
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let normalized = text.trim().to_lowercase();
    if let Some(captures) = TIME_RE.captures(&normalized) {
        let hour: u32 = captures.get(1)?.as_str().parse().ok()?;
        let minute: u32 = captures.get(2)?.as_str().parse().ok()?;
        let hour = match captures.get(3) {
            Some(meridiem) => to_hour_24(hour, meridiem.as_str())?,
            None => hour,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }
    if let Some(captures) = HOUR_RE.captures(&normalized) {
        let hour: u32 = captures.get(1)?.as_str().parse().ok()?;
        let hour = to_hour_24(hour, captures.get(2)?.as_str())?;
        return NaiveTime::from_hms_opt(hour, 0, 0);
    }
    None
}

fn to_hour_24(hour: u32, meridiem: &str) -> Option<u32> {
    if hour == 0 || hour > 12 {
        return None;
    }
    let converted = hour % 12;
    if meridiem.eq_ignore_ascii_case("pm") {
        Some(converted + 12)
    } else {
        Some(converted)
    }
}

/// Combines a date expression with an optional time expression.
///
/// A missing or unparsable time leaves the resolved date at midnight, while
/// an unparsable date makes the whole expression unparsable.
pub fn parse_datetime(date_text: &str, time_text: Option<&str>) -> Option<NaiveDateTime> {
    parse_datetime_at(date_text, time_text, Local::now().naive_local())
}

pub fn parse_datetime_at(
    date_text: &str,
    time_text: Option<&str>,
    reference: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let date = parse_date_at(date_text, reference)?;
    if let Some(time) = time_text.and_then(parse_time) {
        Some(date.date().and_time(time))
    } else {
        Some(date)
    }
}

pub fn is_future(datetime: NaiveDateTime) -> bool {
    is_future_at(datetime, Local::now().naive_local())
}

pub fn is_future_at(datetime: NaiveDateTime, reference: NaiveDateTime) -> bool {
    datetime > reference
}

/// Formats a resolved datetime for display, e.g. "March 15, 2024 at 02:30 PM".
pub fn format_datetime(datetime: NaiveDateTime, include_time: bool) -> String {
    if include_time {
        datetime.format("%B %d, %Y at %I:%M %p").to_string()
    } else {
        datetime.format("%B %d, %Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedDatetime {
    pub date: Option<NaiveDateTime>,
    pub time: Option<NaiveTime>,
    pub datetime: Option<NaiveDateTime>,
}

/// Scans free text for the first date and time expressions it contains.
/// The combined `datetime` is only populated when both were found.
pub fn extract_datetime_from_text(text: &str) -> ExtractedDatetime {
    extract_datetime_from_text_at(text, Local::now().naive_local())
}

pub fn extract_datetime_from_text_at(text: &str, reference: NaiveDateTime) -> ExtractedDatetime {
    let date = find_date_expression(text).and_then(|range| parse_date_at(&text[range], reference));
    let time = find_time_expression(text).and_then(|range| parse_time(&text[range]));
    let datetime = match (date, time) {
        (Some(date), Some(time)) => Some(date.date().and_time(time)),
        _ => None,
    };
    ExtractedDatetime {
        date,
        time,
        datetime,
    }
}

pub(crate) fn find_date_expression(text: &str) -> Option<Range<usize>> {
    RELATIVE_DATE_RE
        .find(text)
        .or_else(|| MONTH_DATE_RE.find(text))
        .or_else(|| ISO_DATE_RE.find(text))
        .or_else(|| NUMERIC_DATE_RE.find(text))
        .map(|matched| matched.start()..matched.end())
}

pub(crate) fn find_time_expression(text: &str) -> Option<Range<usize>> {
    TIME_RE
        .find(text)
        .or_else(|| HOUR_RE.find(text))
        .map(|matched| matched.start()..matched.end())
}
