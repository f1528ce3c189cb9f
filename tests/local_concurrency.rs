// Several writers sharing one task file.
use chrono::NaiveDate;
use studydesk::config::Config;
use studydesk::context::TestContext;
use studydesk::storage::LocalStorage;
use studydesk::store::Command;
use std::thread;

#[test]
fn test_concurrent_adds_are_all_kept() {
    let ctx = TestContext::new();
    let config = Config::default();
    let now = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    thread::scope(|s| {
        for i in 0..8 {
            let ctx = &ctx;
            let config = &config;
            s.spawn(move || {
                LocalStorage::modify(ctx, |list| {
                    list.apply(
                        Command::Add {
                            input: format!("Task {} tomorrow", i),
                            now,
                        },
                        config,
                    )
                })
                .unwrap();
            });
        }
    });

    let tasks = LocalStorage::load(&ctx).unwrap();
    assert_eq!(tasks.len(), 8);
    for i in 0..8 {
        assert!(tasks.iter().any(|t| t.text == format!("Task {}", i)));
    }
}

#[test]
fn test_failed_change_leaves_file_untouched() {
    let ctx = TestContext::new();
    let config = Config::default();
    let now = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    LocalStorage::modify(&ctx, |list| {
        list.apply(
            Command::Add {
                input: "Read chapter 3".to_string(),
                now,
            },
            &config,
        )
    })
    .unwrap();

    let err = LocalStorage::modify(&ctx, |list| {
        list.apply(
            Command::Add {
                input: "Stray".to_string(),
                now,
            },
            &config,
        )?;
        list.apply(Command::Toggle("missing".to_string()), &config)
    })
    .unwrap_err();
    assert!(err.to_string().contains("No task with id"));

    let tasks = LocalStorage::load(&ctx).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Read chapter 3");
}
