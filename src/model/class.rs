// File: src/model/class.rs
use crate::config::Config;
use crate::model::event::{CalendarEvent, EventKind};
use crate::model::item::{Priority, Task};
use crate::model::session::{MeetingPattern, SessionOccurrence, generate_sessions, weekday_index};
use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A class as entered in the "new class" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub section_number: Option<String>,
    pub meeting_days: Vec<u8>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: Option<String>,
    pub semester_start: NaiveDate,
    pub semester_end: NaiveDate,
}

impl ClassInfo {
    /// Reads a class from a `.json` file, or TOML for anything else.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read class file '{}'", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let class = if is_json {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse class file '{}'", path.display()))?
        } else {
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse class file '{}'", path.display()))?
        };
        Ok(class)
    }

    pub fn to_pattern(&self) -> MeetingPattern {
        MeetingPattern {
            days_of_week: self.meeting_days.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            location: self.location.clone(),
            range_start: self.semester_start,
            range_end: self.semester_end,
        }
    }

    pub fn sessions(&self, user_id: &str) -> Vec<SessionOccurrence> {
        generate_sessions(&self.to_pattern(), &self.id, user_id)
    }

    /// "CS 101 Section 2", falling back to the class name without a code.
    pub fn title(&self) -> String {
        let base = self
            .code
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&self.name);
        match self.section_number.as_deref().filter(|s| !s.is_empty()) {
            Some(section) => format!("{} Section {}", base, section),
            None => base.to_string(),
        }
    }
}

/// What goes on the calendar and task list right after a class is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassPlan {
    pub events: Vec<CalendarEvent>,
    pub tasks: Vec<Task>,
}

impl ClassPlan {
    pub fn build(class: &ClassInfo, today: NaiveDate, config: &Config) -> Self {
        let mut plan = ClassPlan::default();
        let title = class.title();
        let start_day = i64::from(weekday_index(class.semester_start));
        let task_horizon = today
            .checked_add_days(Days::new(u64::from(config.attend_task_horizon_days)))
            .unwrap_or(NaiveDate::MAX);

        for week in 0..config.preview_weeks {
            let Some(week_start) = class
                .semester_start
                .checked_add_days(Days::new(u64::from(week) * 7))
                .filter(|d| *d <= class.semester_end)
            else {
                break;
            };
            for &day in &class.meeting_days {
                if day > 6 {
                    continue;
                }
                let offset = (i64::from(day) - start_day).rem_euclid(7) as u64;
                let Some(date) = week_start.checked_add_days(Days::new(offset)) else {
                    continue;
                };

                if date > class.semester_end || date < today {
                    continue;
                }

                plan.events.push(CalendarEvent {
                    id: format!("class-{}-{}", class.id, date.format("%Y%m%d")),
                    class_id: class.id.clone(),
                    title: title.clone(),
                    date,
                    start_time: class.start_time.clone(),
                    end_time: class.end_time.clone(),
                    kind: EventKind::Lecture,
                    location: class.location.clone(),
                });

                if week < config.attend_task_weeks && date <= task_horizon {
                    let text = format!(
                        "Attend {} - {}",
                        title,
                        class.location.as_deref().unwrap_or("TBA")
                    );
                    plan.tasks
                        .push(Task::new(text, Some(date), Priority::P2).with_source(&class.id));
                }
            }
        }

        plan.events.sort_by(|a, b| a.date.cmp(&b.date));
        plan.tasks.sort();
        log::debug!(
            "Class {} plan: {} events, {} tasks",
            class.id,
            plan.events.len(),
            plan.tasks.len()
        );
        plan
    }
}
