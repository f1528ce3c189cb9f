// Calendar preview and attend tasks for a newly created class.
use chrono::NaiveDate;
use std::fs;
use studydesk::config::Config;
use studydesk::context::{AppContext, TestContext};
use studydesk::model::{ClassInfo, ClassPlan, EventKind, Priority};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cs101() -> ClassInfo {
    ClassInfo {
        id: "cs101".to_string(),
        name: "Introduction to Computer Science".to_string(),
        code: Some("CS 101".to_string()),
        section_number: None,
        meeting_days: vec![1, 3, 5],
        start_time: "09:00".to_string(),
        end_time: "09:50".to_string(),
        location: Some("Room 204".to_string()),
        semester_start: date(2025, 8, 18),
        semester_end: date(2025, 12, 10),
    }
}

#[test]
fn test_past_meetings_are_skipped() {
    let plan = ClassPlan::build(&cs101(), date(2025, 8, 20), &Config::default());

    // 4 weeks of MWF minus Monday 08-18
    assert_eq!(plan.events.len(), 11);
    assert_eq!(plan.events[0].date, date(2025, 8, 20));
    assert_eq!(plan.events.last().unwrap().date, date(2025, 9, 12));
    assert!(plan.events.iter().all(|e| e.kind == EventKind::Lecture));
    assert_eq!(plan.events[0].id, "class-cs101-20250820");
    assert_eq!(plan.events[0].title, "CS 101");
}

#[test]
fn test_attend_tasks_cover_first_two_weeks() {
    let plan = ClassPlan::build(&cs101(), date(2025, 8, 20), &Config::default());

    let due: Vec<NaiveDate> = plan.tasks.iter().filter_map(|t| t.due_date).collect();
    assert_eq!(
        due,
        vec![
            date(2025, 8, 20),
            date(2025, 8, 22),
            date(2025, 8, 25),
            date(2025, 8, 27),
            date(2025, 8, 29)
        ]
    );
    for t in &plan.tasks {
        assert_eq!(t.text, "Attend CS 101 - Room 204");
        assert_eq!(t.priority, Priority::P2);
        assert_eq!(t.source.as_deref(), Some("cs101"));
    }
}

#[test]
fn test_task_horizon_limits_attend_tasks() {
    let cfg = Config {
        attend_task_horizon_days: 3,
        ..Config::default()
    };
    let plan = ClassPlan::build(&cs101(), date(2025, 8, 18), &cfg);
    let due: Vec<NaiveDate> = plan.tasks.iter().filter_map(|t| t.due_date).collect();
    assert_eq!(due, vec![date(2025, 8, 18), date(2025, 8, 20)]);
    assert_eq!(plan.events.len(), 12);
}

#[test]
fn test_semester_end_truncates_preview() {
    let mut class = cs101();
    class.semester_end = date(2025, 8, 27);
    let plan = ClassPlan::build(&class, date(2025, 8, 20), &Config::default());
    let dates: Vec<NaiveDate> = plan.events.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2025, 8, 20),
            date(2025, 8, 22),
            date(2025, 8, 25),
            date(2025, 8, 27)
        ]
    );
}

#[test]
fn test_first_meeting_after_midweek_start() {
    let mut class = cs101();
    class.meeting_days = vec![1];
    class.semester_start = date(2025, 8, 20); // Wednesday
    let plan = ClassPlan::build(&class, date(2025, 8, 1), &Config::default());
    assert_eq!(plan.events[0].date, date(2025, 8, 25));
    assert_eq!(plan.events.len(), 4);
}

#[test]
fn test_title_with_section_and_fallback() {
    let mut class = cs101();
    class.section_number = Some("2".to_string());
    assert_eq!(class.title(), "CS 101 Section 2");

    class.code = None;
    class.section_number = None;
    assert_eq!(class.title(), "Introduction to Computer Science");
}

#[test]
fn test_class_sessions_use_pattern() {
    let sessions = cs101().sessions("user-1");
    assert_eq!(sessions.len(), 50);
    assert_eq!(sessions[0].class_id, "cs101");
}

#[test]
fn test_load_class_from_toml_and_json() {
    let ctx = TestContext::new();
    let dir = ctx.get_data_dir().unwrap();

    let toml_path = dir.join("cs101.toml");
    fs::write(
        &toml_path,
        r#"
id = "cs101"
name = "Introduction to Computer Science"
code = "CS 101"
meeting_days = [1, 3, 5]
start_time = "09:00"
end_time = "09:50"
location = "Room 204"
semester_start = "2025-08-18"
semester_end = "2025-12-10"
"#,
    )
    .unwrap();
    assert_eq!(ClassInfo::load(&toml_path).unwrap(), cs101());

    let json_path = dir.join("cs101.json");
    fs::write(&json_path, serde_json::to_string(&cs101()).unwrap()).unwrap();
    assert_eq!(ClassInfo::load(&json_path).unwrap(), cs101());

    let err = ClassInfo::load(&dir.join("missing.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read class file"));
}

#[test]
fn test_huge_preview_stops_at_semester_end() {
    let config = Config {
        preview_weeks: u32::MAX,
        attend_task_horizon_days: u32::MAX,
        ..Config::default()
    };
    let plan = ClassPlan::build(&cs101(), date(2025, 8, 18), &config);
    assert_eq!(plan.events.last().unwrap().date, date(2025, 12, 10));
    assert_eq!(plan.tasks.len(), 6);
}
