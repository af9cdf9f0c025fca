//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `planner_core` linkage.
//! - Print one day's agenda from the configured document.

use chrono::{Local, NaiveDate};
use planner_core::view::labels::{date_label, progress_label, time_label};
use planner_core::{
    init_logging, DayAgenda, ItemPool, JsonFileRepository, PlannerConfig, PlannerStore,
    PoolSizing,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match args.first().map(String::as_str) {
        None => {
            println!("planner_core ping={}", planner_core::ping());
            println!("planner_core version={}", planner_core::core_version());
            ExitCode::SUCCESS
        }
        Some("agenda") => match run_agenda(args.get(1).map(String::as_str)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        Some(other) => {
            eprintln!("unknown command `{other}`; usage: planner_cli [agenda [YYYY-MM-DD]]");
            ExitCode::from(2)
        }
    }
}

fn run_agenda(raw_date: Option<&str>) -> Result<(), String> {
    let date = match raw_date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| format!("invalid date `{raw}`; expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };

    let config = PlannerConfig::from_env();
    let log_dir = config.log_dir();
    if let Err(err) = init_logging(config.log_level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging unavailable: {err}");
    }
    let store = PlannerStore::open(JsonFileRepository::new(config.document_path()))
        .map_err(|err| err.to_string())?;
    print_agenda(&store.query_by_date(date), config.pool_sizing);
    Ok(())
}

/// Binds `items` through a slot pool; returns the shown rows and the overflow.
fn pooled<T: Clone>(items: &[T], sizing: PoolSizing) -> (Vec<T>, usize) {
    let mut pool = ItemPool::new(sizing);
    let overflow = pool.bind(items).overflow;
    (pool.visible().cloned().collect(), overflow)
}

fn print_overflow(overflow: usize) {
    if overflow > 0 {
        println!("  ... {overflow} more");
    }
}

fn print_agenda(agenda: &DayAgenda, sizing: PoolSizing) {
    println!("{}", date_label(agenda.date));
    if agenda.is_empty() {
        println!("  nothing planned");
        return;
    }

    let (projects, overflow) = pooled(&agenda.projects, sizing);
    for project in &projects {
        println!("  [project] {} ({})", project.name, progress_label(project));
        for task in &project.tasks {
            let mark = if task.is_completed { 'x' } else { ' ' };
            println!(
                "    [{mark}] {} {} {}",
                time_label(task.date_time),
                task.name,
                task.priority
            );
        }
    }
    print_overflow(overflow);

    let (lessons, overflow) = pooled(&agenda.lessons, sizing);
    for lesson in &lessons {
        println!("  [lesson] {} {}", time_label(lesson.date_time), lesson.name);
    }
    print_overflow(overflow);

    let (home_tasks, overflow) = pooled(&agenda.home_tasks, sizing);
    for home_task in &home_tasks {
        println!(
            "  [home task] {} {} ({}, {})",
            time_label(home_task.date_time),
            home_task.name,
            home_task.subject_name,
            home_task.priority
        );
    }
    print_overflow(overflow);
}
