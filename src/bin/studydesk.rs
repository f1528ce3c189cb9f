use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use simplelog::{
    ColorChoice, CombinedLogger, LevelFilter, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use studydesk::cli::print_help;
use studydesk::config::Config;
use studydesk::context::{AppContext, StandardContext};
use studydesk::model::adapter::{events_to_ics, sessions_to_ics};
use studydesk::model::display::due_label;
use studydesk::model::phrase::highlight;
use studydesk::model::{ClassInfo, ClassPlan, detect_date, parse_date_from_input};
use studydesk::storage::LocalStorage;
use studydesk::store::{Command, Outcome, TaskList};

struct GlobalArgs {
    root: Option<PathBuf>,
    today: Option<NaiveDate>,
    verbose: bool,
    rest: Vec<String>,
}

fn parse_global_args(args: Vec<String>) -> Result<GlobalArgs> {
    let mut out = GlobalArgs {
        root: None,
        today: None,
        verbose: false,
        rest: Vec::new(),
    };
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" | "--root" => {
                let path = iter.next().ok_or_else(|| anyhow!("--root needs a path"))?;
                out.root = Some(PathBuf::from(path));
            }
            "--today" => {
                let raw = iter.next().ok_or_else(|| anyhow!("--today needs a date"))?;
                let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("Invalid --today date '{}'", raw))?;
                out.today = Some(date);
            }
            "-v" | "--verbose" => out.verbose = true,
            _ => out.rest.push(arg),
        }
    }
    Ok(out)
}

fn init_logging(ctx: &dyn AppContext, verbose: bool) {
    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = ctx.get_log_file_path()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(&path)
    {
        loggers.push(WriteLogger::new(
            LevelFilter::Info,
            simplelog::Config::default(),
            file,
        ));
    }
    // A logger may already be installed when embedded; not fatal.
    let _ = CombinedLogger::init(loggers);
}

/// Removes a boolean flag such as `--ics` wherever it appears.
fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    if let Some(idx) = args.iter().position(|a| a == name) {
        args.remove(idx);
        true
    } else {
        false
    }
}

/// Removes a `--name value` pair and returns the value.
fn take_value(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    match args.iter().position(|a| a == name) {
        Some(idx) if idx + 1 < args.len() => {
            let value = args.remove(idx + 1);
            args.remove(idx);
            Ok(Some(value))
        }
        Some(_) => Err(anyhow!("{} needs a value", name)),
        None => Ok(None),
    }
}

fn class_from_args(args: &[String]) -> Result<ClassInfo> {
    let path = args
        .first()
        .ok_or_else(|| anyhow!("Missing class file (see --help)"))?;
    ClassInfo::load(&PathBuf::from(path))
}

fn run_task_command(
    ctx: &dyn AppContext,
    config: &Config,
    command: Command,
    today: NaiveDate,
) -> Result<()> {
    // Scheduling only reads the list.
    let outcome = if matches!(command, Command::ScheduleOnCalendar(_)) {
        TaskList::new(LocalStorage::load(ctx)?).apply(command, config)?
    } else {
        LocalStorage::modify(ctx, |list| list.apply(command, config))?
    };
    match outcome {
        Outcome::Added(task) => {
            let due = task
                .due_date
                .map(|d| format!(" (due {})", due_label(d, today)))
                .unwrap_or_default();
            println!("Added {} {}{}", task.uid, task.text, due);
        }
        Outcome::Toggled { uid, completed } => {
            println!(
                "{} {}",
                uid,
                if completed { "completed" } else { "reopened" }
            );
        }
        Outcome::Deleted(task) => println!("Deleted {}", task.text),
        Outcome::Scheduled(event) => {
            println!("{}", events_to_ics(std::slice::from_ref(&event)));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let global = parse_global_args(env::args().skip(1).collect())?;
    let ctx = StandardContext::new(global.root.clone());
    init_logging(&ctx, global.verbose);

    let config = Config::load_or_default(&ctx)?;
    let today = global.today.unwrap_or_else(|| Local::now().date_naive());
    let now: NaiveDateTime = match global.today {
        Some(d) => d.and_time(NaiveTime::MIN),
        None => Local::now().naive_local(),
    };

    let mut rest = global.rest;
    if rest.is_empty() || matches!(rest[0].as_str(), "-h" | "--help" | "help") {
        print_help("studydesk");
        return Ok(());
    }
    let sub = rest.remove(0);

    match sub.as_str() {
        "parse" => {
            let text = rest.join(" ");
            match detect_date(&text, now) {
                Some(found) => {
                    let (before, phrase, after) = highlight(&text, &found);
                    let parsed = parse_date_from_input(&text, now);
                    println!("Task:   {}[{}]{}", before, phrase, after);
                    println!(
                        "Date:   {} ({})",
                        found.resolved_date,
                        due_label(found.resolved_date, today)
                    );
                    println!("Label:  {}", parsed.clean_text);
                }
                None => {
                    println!("No date found");
                    println!("Label:  {}", text.trim());
                }
            }
        }
        "add" => {
            let input = rest.join(" ");
            run_task_command(&ctx, &config, Command::Add { input, now }, today)?;
        }
        "done" | "rm" | "schedule" => {
            let uid = rest
                .first()
                .cloned()
                .ok_or_else(|| anyhow!("'{}' needs a task id", sub))?;
            let command = match sub.as_str() {
                "done" => Command::Toggle(uid),
                "rm" => Command::Delete(uid),
                _ => Command::ScheduleOnCalendar(uid),
            };
            run_task_command(&ctx, &config, command, today)?;
        }
        "list" => {
            let list = TaskList::new(LocalStorage::load(&ctx)?);
            for group in list.grouped(today) {
                println!("{}", group.label);
                for task in group.tasks {
                    println!(
                        "  {} {} [{}] {}",
                        task.checkbox_symbol(),
                        task.text,
                        task.priority,
                        task.uid
                    );
                }
            }
            println!(
                "{} active, {} completed",
                list.active_count(),
                list.completed_count()
            );
        }
        "sessions" => {
            let ics = take_flag(&mut rest, "--ics");
            let class_id = take_value(&mut rest, "--class-id")?;
            let user_id =
                take_value(&mut rest, "--user-id")?.unwrap_or_else(|| config.default_user_id.clone());
            let mut class = class_from_args(&rest)?;
            if let Some(id) = class_id {
                class.id = id;
            }
            let sessions = class.sessions(&user_id);
            if ics {
                println!("{}", sessions_to_ics(&sessions, &class.title()));
            } else {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            }
        }
        "plan" => {
            let save = take_flag(&mut rest, "--save");
            let ics = take_flag(&mut rest, "--ics");
            let class = class_from_args(&rest)?;
            let plan = ClassPlan::build(&class, today, &config);
            if ics {
                println!("{}", events_to_ics(&plan.events));
            } else {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            }
            if save {
                let added =
                    LocalStorage::modify(&ctx, |list| Ok(list.insert_generated(plan.tasks)))?;
                log::info!("Saved {} attend tasks for class {}", added, class.id);
            }
        }
        other => {
            print_help("studydesk");
            return Err(anyhow!("Unknown command '{}'", other));
        }
    }
    Ok(())
}
