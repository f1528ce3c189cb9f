// File: ./src/model/item.rs
use crate::model::phrase::parse_date_from_input;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};
use uuid::Uuid;

fn default_uid() -> String {
    Uuid::new_v4().to_string()
}

/// p1 is the most urgent, p4 the default for typed tasks.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    P1,
    P2,
    P3,
    #[default]
    P4,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "default_uid")]
    pub uid: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    /// Class id for tasks generated from a class schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Task {
    pub fn new(text: impl Into<String>, due_date: Option<NaiveDate>, priority: Priority) -> Self {
        Self {
            uid: default_uid(),
            text: text.into(),
            completed: false,
            due_date,
            priority,
            source: None,
        }
    }

    /// Builds a task from typed input, lifting a date phrase into `due_date`.
    pub fn from_input(input: &str, reference_now: NaiveDateTime, priority: Priority) -> Self {
        let parsed = parse_date_from_input(input, reference_now);
        Self::new(
            parsed.clean_text,
            parsed.date.map(|m| m.resolved_date),
            priority,
        )
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn checkbox_symbol(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}

// --- SORTING ---
// Open before done, dated before undated, then priority, then text.
impl Ord for Task {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.completed != other.completed {
            return self.completed.cmp(&other.completed);
        }
        match (self.due_date, other.due_date) {
            (Some(d1), Some(d2)) if d1 != d2 => return d1.cmp(&d2),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            _ => {}
        }
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| self.uid.cmp(&other.uid))
    }
}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
