// File: src/model/event.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    Lecture,
    StudySession,
}

/// An entry on the planner calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub class_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub kind: EventKind,
    pub location: Option<String>,
}
