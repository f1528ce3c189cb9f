// File: src/model/display.rs
// Human labels for due days.
use chrono::{Duration, NaiveDate};

/// Short label used next to a single task: "Today", "Tomorrow", "Wed, Mar 12".
pub fn due_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else {
        date.format("%a, %b %-d").to_string()
    }
}

/// Heading for a group of tasks sharing a due day.
pub fn group_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else if date == today - Duration::days(1) {
        "Yesterday".to_string()
    } else {
        date.format("%A, %b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn relative_labels() {
        let today = d(2025, 3, 10);
        assert_eq!(due_label(today, today), "Today");
        assert_eq!(due_label(d(2025, 3, 11), today), "Tomorrow");
        assert_eq!(group_label(d(2025, 3, 9), today), "Yesterday");
    }

    #[test]
    fn absolute_labels() {
        let today = d(2025, 3, 10);
        assert_eq!(due_label(d(2025, 3, 12), today), "Wed, Mar 12");
        assert_eq!(group_label(d(2025, 3, 5), today), "Wednesday, Mar 5");
        // "Yesterday" is only a group heading
        assert_eq!(due_label(d(2025, 3, 9), today), "Sun, Mar 9");
    }
}
