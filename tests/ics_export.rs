// iCalendar output for sessions and planner events.
use chrono::NaiveDate;
use studydesk::model::adapter::{events_to_ics, sessions_to_ics};
use studydesk::model::{CalendarEvent, EventKind, MeetingPattern, generate_sessions};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_sessions_become_timed_events() {
    let pattern = MeetingPattern {
        days_of_week: vec![2, 4],
        start_time: "10:10".to_string(),
        end_time: "11:00".to_string(),
        location: Some("Room 301".to_string()),
        range_start: date(2025, 8, 18),
        range_end: date(2025, 8, 24),
    };
    let sessions = generate_sessions(&pattern, "math232", "u");
    let ics = sessions_to_ics(&sessions, "MATH 232");

    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
    assert!(ics.contains("DTSTART:20250819T101000"));
    assert!(ics.contains("DTEND:20250819T110000"));
    assert!(ics.contains("DTSTART:20250821T101000"));
    assert!(ics.contains("LOCATION:Room 301"));
    assert!(ics.contains("SUMMARY:MATH 232"));
    assert!(ics.contains("UID:math232-20250819@studydesk"));
    assert!(ics.contains("X-STUDYDESK-ATTENDANCE:pending"));
}

#[test]
fn test_unreadable_times_fall_back_to_all_day() {
    let pattern = MeetingPattern {
        days_of_week: vec![1],
        start_time: "TBA".to_string(),
        end_time: "TBA".to_string(),
        location: None,
        range_start: date(2025, 8, 18),
        range_end: date(2025, 8, 18),
    };
    let ics = sessions_to_ics(&generate_sessions(&pattern, "c", "u"), "Seminar");
    assert!(ics.contains("DTSTART;VALUE=DATE:20250818"));
    assert!(!ics.contains("LOCATION"));
}

#[test]
fn test_events_export() {
    let event = CalendarEvent {
        id: "schedule-abc".to_string(),
        class_id: "schedule-builder".to_string(),
        title: "Review notes".to_string(),
        date: date(2025, 3, 12),
        start_time: "10:00".to_string(),
        end_time: "11:00".to_string(),
        kind: EventKind::StudySession,
        location: None,
    };
    let ics = events_to_ics(&[event]);
    assert!(ics.contains("BEGIN:VCALENDAR"));
    assert!(ics.contains("UID:schedule-abc@studydesk"));
    assert!(ics.contains("CATEGORIES:study-session"));
    assert!(ics.contains("DTSTART:20250312T100000"));
}
