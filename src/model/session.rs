// File: src/model/session.rs
// Expands a weekly meeting pattern into concrete class sessions.
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Pending,
    Attended,
    Missed,
    Excused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingPattern {
    /// 0 = Sunday .. 6 = Saturday
    pub days_of_week: Vec<u8>,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOccurrence {
    pub class_id: String,
    pub user_id: String,
    pub session_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub attendance: AttendanceStatus,
    pub notes: Option<String>,
    pub calendar_event_id: Option<String>,
}

/// Sunday-based weekday index, as stored in meeting patterns.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Walks `[start, end]` one day at a time. Empty when `start > end`.
pub struct DayRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DayRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        // Stop on the last day itself so `end` is yielded exactly once.
        self.next = if current == self.end {
            None
        } else {
            current.checked_add_signed(Duration::days(1))
        };
        Some(current)
    }
}

impl MeetingPattern {
    pub fn meets_on(&self, date: NaiveDate) -> bool {
        self.days_of_week.contains(&weekday_index(date))
    }

    /// Every meeting date in range, ascending.
    pub fn occurrence_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        DayRange::new(self.range_start, self.range_end).filter(|d| self.meets_on(*d))
    }
}

pub fn generate_sessions(
    pattern: &MeetingPattern,
    class_id: &str,
    user_id: &str,
) -> Vec<SessionOccurrence> {
    let sessions: Vec<SessionOccurrence> = pattern
        .occurrence_dates()
        .map(|session_date| SessionOccurrence {
            class_id: class_id.to_string(),
            user_id: user_id.to_string(),
            session_date,
            start_time: pattern.start_time.clone(),
            end_time: pattern.end_time.clone(),
            location: pattern.location.clone(),
            topics: Vec::new(),
            attendance: AttendanceStatus::Pending,
            notes: None,
            calendar_event_id: None,
        })
        .collect();

    log::debug!(
        "Generated {} sessions for class {} ({} to {})",
        sessions.len(),
        class_id,
        pattern.range_start,
        pattern.range_end
    );
    sessions
}
