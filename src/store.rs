// File: src/store.rs
//! In-memory task list and the commands that change it.
//!
//! Front ends never mutate tasks directly: they build a [`Command`], hand it
//! to [`TaskList::apply`] together with the current [`Config`], and react to
//! the returned [`Outcome`].
use crate::config::Config;
use crate::model::display::group_label;
use crate::model::{CalendarEvent, EventKind, Task};
use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};

pub const COMPLETED_GROUP: &str = "Completed";
pub const NO_DATE_GROUP: &str = "No date";

#[derive(Debug, Clone)]
pub enum Command {
    /// Typed input; a date phrase inside it becomes the due date.
    Add { input: String, now: NaiveDateTime },
    Insert(Task),
    Toggle(String),
    Delete(String),
    ScheduleOnCalendar(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(Task),
    Toggled { uid: String, completed: bool },
    Deleted(Task),
    Scheduled(CalendarEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKey {
    Day(NaiveDate),
    NoDate,
    Completed,
}

#[derive(Debug, Clone)]
pub struct TaskGroup<'a> {
    pub key: GroupKey,
    pub label: String,
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, uid: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.uid == uid)
    }

    fn position(&self, uid: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.uid == uid)
            .ok_or_else(|| anyhow!("No task with id '{}'", uid))
    }

    pub fn apply(&mut self, command: Command, config: &Config) -> Result<Outcome> {
        match command {
            Command::Add { input, now } => {
                if input.trim().is_empty() {
                    return Err(anyhow!("Task text is empty"));
                }
                let task = Task::from_input(&input, now, config.default_priority);
                log::debug!("Adding task '{}' due {:?}", task.text, task.due_date);
                self.tasks.push(task.clone());
                Ok(Outcome::Added(task))
            }
            Command::Insert(task) => {
                if self.get(&task.uid).is_some() {
                    return Err(anyhow!("Task '{}' already exists", task.uid));
                }
                self.tasks.push(task.clone());
                Ok(Outcome::Added(task))
            }
            Command::Toggle(uid) => {
                let idx = self.position(&uid)?;
                let task = &mut self.tasks[idx];
                task.completed = !task.completed;
                Ok(Outcome::Toggled {
                    uid,
                    completed: task.completed,
                })
            }
            Command::Delete(uid) => {
                let idx = self.position(&uid)?;
                Ok(Outcome::Deleted(self.tasks.remove(idx)))
            }
            Command::ScheduleOnCalendar(uid) => {
                let task = &self.tasks[self.position(&uid)?];
                let date = task.due_date.ok_or_else(|| {
                    anyhow!("Add a date first: '{}' has no due date", task.text)
                })?;
                Ok(Outcome::Scheduled(CalendarEvent {
                    id: format!("schedule-{}", task.uid),
                    class_id: "schedule-builder".to_string(),
                    title: task.text.clone(),
                    date,
                    start_time: config.study_session_start.clone(),
                    end_time: config.study_session_end.clone(),
                    kind: EventKind::StudySession,
                    location: None,
                }))
            }
        }
    }

    /// Adds class-generated tasks, skipping any already present with the
    /// same source, due date and text. Returns how many were added.
    pub fn insert_generated(&mut self, tasks: Vec<Task>) -> usize {
        let mut added = 0;
        for task in tasks {
            let exists = self.tasks.iter().any(|t| {
                t.source == task.source && t.due_date == task.due_date && t.text == task.text
            });
            if exists {
                log::debug!("Skipping existing task '{}'", task.text);
                continue;
            }
            self.tasks.push(task);
            added += 1;
        }
        added
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Open tasks by due day (ascending), then undated, then completed.
    pub fn grouped(&self, today: NaiveDate) -> Vec<TaskGroup<'_>> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort();

        let mut groups: Vec<TaskGroup<'_>> = Vec::new();
        for task in sorted {
            let key = match (task.completed, task.due_date) {
                (true, _) => GroupKey::Completed,
                (false, Some(d)) => GroupKey::Day(d),
                (false, None) => GroupKey::NoDate,
            };
            match groups.last_mut() {
                Some(group) if group.key == key => group.tasks.push(task),
                _ => {
                    let label = match &key {
                        GroupKey::Day(d) => group_label(*d, today),
                        GroupKey::NoDate => NO_DATE_GROUP.to_string(),
                        GroupKey::Completed => COMPLETED_GROUP.to_string(),
                    };
                    groups.push(TaskGroup {
                        key,
                        label,
                        tasks: vec![task],
                    });
                }
            }
        }
        groups
    }
}
