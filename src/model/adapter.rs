// File: src/model/adapter.rs
// iCalendar export for generated sessions and planner events.
use crate::model::event::CalendarEvent;
use crate::model::session::SessionOccurrence;
use chrono::{NaiveDate, NaiveTime, Utc};
use icalendar::{Calendar, Component, Event, Property};

fn parse_wall_clock(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Sets DTSTART/DTEND as floating local times, or as an all-day entry
/// when either wall-clock string does not parse.
fn set_times(event: &mut Event, date: NaiveDate, start: &str, end: &str) {
    match (parse_wall_clock(start), parse_wall_clock(end)) {
        (Some(s), Some(e)) => {
            event.add_property(
                "DTSTART",
                date.and_time(s).format("%Y%m%dT%H%M%S").to_string(),
            );
            event.add_property(
                "DTEND",
                date.and_time(e).format("%Y%m%dT%H%M%S").to_string(),
            );
        }
        _ => {
            log::warn!(
                "Unreadable times '{}'-'{}' on {}, exporting as all-day",
                start,
                end,
                date
            );
            let mut prop = Property::new("DTSTART", &date.format("%Y%m%d").to_string());
            prop.add_parameter("VALUE", "DATE");
            event.append_property(prop);
        }
    }
}

fn build_event(
    uid: &str,
    summary: &str,
    date: NaiveDate,
    start: &str,
    end: &str,
    location: Option<&str>,
) -> Event {
    let mut event = Event::new();
    event.uid(uid);
    event.summary(summary);
    event.timestamp(Utc::now());
    set_times(&mut event, date, start, end);
    if let Some(loc) = location.filter(|l| !l.is_empty()) {
        event.add_property("LOCATION", loc);
    }
    event
}

/// One VEVENT per session; `summary` is usually the class title.
pub fn sessions_to_ics(sessions: &[SessionOccurrence], summary: &str) -> String {
    let mut calendar = Calendar::new();
    for s in sessions {
        let uid = format!(
            "{}-{}@studydesk",
            s.class_id,
            s.session_date.format("%Y%m%d")
        );
        let mut event = build_event(
            &uid,
            summary,
            s.session_date,
            &s.start_time,
            &s.end_time,
            s.location.as_deref(),
        );
        event.add_property("X-STUDYDESK-ATTENDANCE", s.attendance.to_string());
        calendar.push(event);
    }
    calendar.to_string()
}

pub fn events_to_ics(events: &[CalendarEvent]) -> String {
    let mut calendar = Calendar::new();
    for e in events {
        let mut event = build_event(
            &format!("{}@studydesk", e.id),
            &e.title,
            e.date,
            &e.start_time,
            &e.end_time,
            e.location.as_deref(),
        );
        event.add_property("CATEGORIES", e.kind.to_string());
        calendar.push(event);
    }
    calendar.to_string()
}
