// File: src/model/phrase.rs
//! Natural-language due dates inside freeform task text.
//!
//! Recognized phrases, tried in this order (first hit wins):
//! - `today`
//! - `tomorrow`, `tmr`
//! - `next monday`, `next tues`, ...
//! - `march 12`, `on Mar 12th`, `dec 25 2027`
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseKind {
    Today,
    Tomorrow,
    NextWeekday(Weekday),
    MonthDay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub kind: PhraseKind,
    pub resolved_date: NaiveDate,
    /// Exact slice of the input, original casing.
    pub matched_phrase: String,
    /// Byte range of `matched_phrase` in the input.
    pub span: Range<usize>,
}

impl DateMatch {
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.resolved_date.and_time(NaiveTime::MIN)
    }
}

/// Task label plus the date pulled out of it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub clean_text: String,
    pub date: Option<DateMatch>,
}

struct PhrasePatterns {
    today: Regex,
    tomorrow: Regex,
    next_weekday: Regex,
    month_day: Regex,
}

const WEEKDAY_ALTS: &str =
    "sunday|monday|tuesday|wednesday|thursday|friday|saturday|sun|mon|tue|tues|wed|thu|thur|fri|sat";

const MONTH_ALTS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec";

fn patterns() -> &'static PhrasePatterns {
    static PATTERNS: OnceLock<PhrasePatterns> = OnceLock::new();
    PATTERNS.get_or_init(PhrasePatterns::new)
}

impl PhrasePatterns {
    fn new() -> Self {
        Self {
            today: Regex::new(r"(?i)\btoday\b").expect("today pattern"),
            tomorrow: Regex::new(r"(?i)\b(?:tomorrow|tmr)\b").expect("tomorrow pattern"),
            next_weekday: Regex::new(&format!(r"(?i)\bnext\s+({})\b", WEEKDAY_ALTS))
                .expect("next weekday pattern"),
            month_day: Regex::new(&format!(
                r"(?i)\b(?:on\s+)?({})\s+(\d{{1,2}})(?:st|nd|rd|th)?(?:\s+(\d{{4}}))?\b",
                MONTH_ALTS
            ))
            .expect("month day pattern"),
        }
    }
}

fn weekday_from_name(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "sun" | "sunday" => Some(Weekday::Sun),
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

fn month_from_name(s: &str) -> Option<u32> {
    let m = match s.to_lowercase().as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(m)
}

/// First date strictly after `from` that falls on `target`, or `None` past
/// the end of the calendar.
pub fn next_weekday(from: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let mut d = from.succ_opt()?;
    while d.weekday() != target {
        d = d.succ_opt()?;
    }
    Some(d)
}

fn resolve_month_day(caps: &Captures, default_year: i32) -> Option<NaiveDate> {
    let month = month_from_name(caps.get(1)?.as_str())?;
    let day = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let year = match caps.get(3) {
        Some(y) => y.as_str().parse::<i32>().ok()?,
        None => default_year,
    };
    // from_ymd_opt refuses Feb 30, Apr 31 and friends; no rollover.
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Finds at most one date phrase in `text`, relative to `reference_now`.
pub fn detect_date(text: &str, reference_now: NaiveDateTime) -> Option<DateMatch> {
    if text.trim().is_empty() {
        return None;
    }
    let p = patterns();
    let today = reference_now.date();

    let found = |kind: PhraseKind, date: NaiveDate, m: regex::Match| DateMatch {
        kind,
        resolved_date: date,
        matched_phrase: m.as_str().to_string(),
        span: m.range(),
    };

    if let Some(m) = p.today.find(text) {
        return Some(found(PhraseKind::Today, today, m));
    }

    if let Some(m) = p.tomorrow.find(text)
        && let Some(date) = today.checked_add_days(Days::new(1))
    {
        return Some(found(PhraseKind::Tomorrow, date, m));
    }

    if let Some(caps) = p.next_weekday.captures(text)
        && let Some(whole) = caps.get(0)
        && let Some(day) = caps.get(1).and_then(|d| weekday_from_name(d.as_str()))
        && let Some(date) = next_weekday(today, day)
    {
        return Some(found(PhraseKind::NextWeekday(day), date, whole));
    }

    for caps in p.month_day.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        match resolve_month_day(&caps, today.year()) {
            Some(date) => return Some(found(PhraseKind::MonthDay, date, whole)),
            None => log::debug!("Ignoring impossible date '{}'", whole.as_str()),
        }
    }

    None
}

/// Splits task input into a label and an optional due date.
///
/// The matched phrase is cut out by position, whitespace runs collapse to a
/// single space and the result is trimmed. A label that would end up empty
/// falls back to the raw input.
pub fn parse_date_from_input(text: &str, reference_now: NaiveDateTime) -> ParsedInput {
    let Some(found) = detect_date(text, reference_now) else {
        return ParsedInput {
            clean_text: text.trim().to_string(),
            date: None,
        };
    };

    let mut remainder = String::with_capacity(text.len());
    remainder.push_str(&text[..found.span.start]);
    remainder.push(' ');
    remainder.push_str(&text[found.span.end..]);
    let collapsed = remainder.split_whitespace().collect::<Vec<_>>().join(" ");

    let clean_text = if collapsed.is_empty() {
        text.to_string()
    } else {
        collapsed
    };

    ParsedInput {
        clean_text,
        date: Some(found),
    }
}

/// (before, phrase, after) slices for rendering a highlighted preview.
pub fn highlight<'a>(text: &'a str, found: &DateMatch) -> (&'a str, &'a str, &'a str) {
    (
        &text[..found.span.start],
        &text[found.span.clone()],
        &text[found.span.end..],
    )
}
