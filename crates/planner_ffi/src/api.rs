//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level planner functions to Dart via FRB.
//! - Run every create/edit through the same form rules the screens use.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One process-wide store handles every call; access is serialized by a
//!   mutex.
//! - Dates cross the boundary as `YYYY-MM-DD`, ids as UUID strings.

use chrono::NaiveDate;
use log::warn;
use planner_core::view::labels::{date_label, progress_label, time_label};
use planner_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CategoryFilter, DayAgenda, EntryForm, EntryId, EntryKind, FormKind, HomeTask, HomeTaskForm,
    ItemPool, JsonFileRepository, Lesson, LessonForm, PlannerConfig, PlannerStore, PoolSizing,
    Project, ProjectForm, SectionVisibility, TaskData, TaskForm,
};
use std::sync::{Mutex, OnceLock, PoisonError};
use uuid::Uuid;

static STORE: Mutex<Option<PlannerStore<JsonFileRepository>>> = Mutex::new(None);
static CONFIG: OnceLock<PlannerConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for create/edit/delete calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id of the created or edited entry.
    pub entry_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, entry_id: EntryId) -> Self {
        Self {
            ok: true,
            entry_id: Some(entry_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            message: message.into(),
        }
    }

    fn from_result(
        operation: &str,
        message: &str,
        result: Result<EntryId, String>,
    ) -> Self {
        match result {
            Ok(id) => Self::success(message, id),
            Err(err) => Self::failure(format!("{operation} failed: {err}")),
        }
    }
}

/// Project task as entered in the project form's task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    /// Existing task id when editing; `None` creates a new task.
    pub task_id: Option<String>,
    pub name: String,
    pub date: String,
    pub hour: String,
    pub minute: String,
    pub meridiem: String,
    pub priority: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub task_id: String,
    pub name: String,
    /// `HH:MM` on a 24-hour clock.
    pub time_label: String,
    pub priority: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    pub entry_id: String,
    pub name: String,
    pub date_label: String,
    /// e.g. `1/3 tasks`.
    pub progress_label: String,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonItem {
    pub entry_id: String,
    pub name: String,
    pub time_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeTaskItem {
    pub entry_id: String,
    pub name: String,
    pub subject_name: String,
    pub time_label: String,
    pub priority: String,
}

/// One day's entries after applying a category filter.
///
/// Hidden sections come back as empty lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaResponse {
    pub ok: bool,
    pub message: String,
    pub date: String,
    pub projects: Vec<ProjectItem>,
    pub lessons: Vec<LessonItem>,
    pub home_tasks: Vec<HomeTaskItem>,
    /// Whether the "nothing planned" placeholder should be shown.
    pub show_empty_state: bool,
    /// Visible-section rows left out because a fixed-size list was full.
    pub overflow_count: u32,
}

impl AgendaResponse {
    fn failure(date: String, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            date,
            projects: Vec::new(),
            lessons: Vec::new(),
            home_tasks: Vec::new(),
            show_empty_state: true,
            overflow_count: 0,
        }
    }
}

/// Returns the entries planned on `date`.
///
/// Input semantics:
/// - `date`: `YYYY-MM-DD`.
/// - `filter`: filter key (`NoFilters|OnlyProjects|OnlyLessons|OnlyHomeTasks`);
///   `None` or an unknown key means `NoFilters`.
///
/// # FFI contract
/// - Sync call, file-backed on first use.
/// - Never panics; failures return `ok=false` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn agenda_for_date(date: String, filter: Option<String>) -> AgendaResponse {
    let day = match parse_date(&date) {
        Ok(day) => day,
        Err(err) => return AgendaResponse::failure(date, format!("agenda_for_date failed: {err}")),
    };
    let filter = filter
        .as_deref()
        .and_then(CategoryFilter::from_key)
        .unwrap_or_default();

    match with_store(|store| Ok(store.query_by_date(day))) {
        Ok(agenda) => to_agenda_response(date, &agenda, filter, config().pool_sizing),
        Err(err) => AgendaResponse::failure(date, format!("agenda_for_date failed: {err}")),
    }
}

/// Whether anything is planned on `date`; `false` for unparseable dates.
#[flutter_rust_bridge::frb(sync)]
pub fn has_data_for_date(date: String) -> bool {
    let Ok(day) = parse_date(&date) else {
        return false;
    };
    with_store(|store| Ok(store.has_data_for_date(day))).unwrap_or(false)
}

/// Creates a lesson from the lesson form's raw field values.
///
/// # FFI contract
/// - Sync call, persists before returning.
/// - Never panics.
/// - Returns operation result and created entry ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn create_lesson(
    name: String,
    date: String,
    hour: String,
    minute: String,
    meridiem: String,
) -> EntryActionResponse {
    let result = (|| -> Result<EntryId, String> {
        let mut form = LessonForm::new();
        form.set_name(&name);
        fill_schedule(&mut form, &date, &hour, &minute, &meridiem)?;
        let lesson = build(&form)?;
        with_store(|store| store.add_lesson(lesson).map_err(|err| err.to_string()))
    })();
    EntryActionResponse::from_result("create_lesson", "Lesson created.", result)
}

/// Replaces the lesson carrying `entry_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_lesson(
    entry_id: String,
    name: String,
    date: String,
    hour: String,
    minute: String,
    meridiem: String,
) -> EntryActionResponse {
    let result = (|| -> Result<EntryId, String> {
        let id = parse_id(&entry_id)?;
        with_store(|store| {
            let existing = store
                .lesson(id)
                .ok_or_else(|| not_found(EntryKind::Lesson, id))?;
            let mut form = LessonForm::for_edit(existing);
            form.set_name(&name);
            fill_schedule(&mut form, &date, &hour, &minute, &meridiem)?;
            let lesson: Lesson = build(&form)?;
            store.edit_lesson(lesson).map_err(|err| err.to_string())?;
            Ok(id)
        })
    })();
    EntryActionResponse::from_result("edit_lesson", "Lesson updated.", result)
}

/// Creates a home task from the home-task form's raw field values.
#[flutter_rust_bridge::frb(sync)]
pub fn create_home_task(
    name: String,
    subject_name: String,
    date: String,
    hour: String,
    minute: String,
    meridiem: String,
    priority: String,
) -> EntryActionResponse {
    let result = (|| -> Result<EntryId, String> {
        let mut form = HomeTaskForm::new();
        fill_home_task(
            &mut form,
            &name,
            &subject_name,
            &date,
            [hour.as_str(), minute.as_str(), meridiem.as_str()],
            &priority,
        )?;
        let home_task = build(&form)?;
        with_store(|store| store.add_home_task(home_task).map_err(|err| err.to_string()))
    })();
    EntryActionResponse::from_result("create_home_task", "Home task created.", result)
}

/// Replaces the home task carrying `entry_id`.
#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn edit_home_task(
    entry_id: String,
    name: String,
    subject_name: String,
    date: String,
    hour: String,
    minute: String,
    meridiem: String,
    priority: String,
) -> EntryActionResponse {
    let result = (|| -> Result<EntryId, String> {
        let id = parse_id(&entry_id)?;
        with_store(|store| {
            let existing = store
                .home_task(id)
                .ok_or_else(|| not_found(EntryKind::HomeTask, id))?;
            let mut form = HomeTaskForm::for_edit(existing);
            fill_home_task(
                &mut form,
                &name,
                &subject_name,
                &date,
                [hour.as_str(), minute.as_str(), meridiem.as_str()],
                &priority,
            )?;
            let home_task: HomeTask = build(&form)?;
            store.edit_home_task(home_task).map_err(|err| err.to_string())?;
            Ok(id)
        })
    })();
    EntryActionResponse::from_result("edit_home_task", "Home task updated.", result)
}

/// Creates a project with its task list.
///
/// A project needs at least one task; every task must pass the task form
/// rules.
#[flutter_rust_bridge::frb(sync)]
pub fn create_project(name: String, date: String, tasks: Vec<TaskInput>) -> EntryActionResponse {
    let result = (|| -> Result<EntryId, String> {
        let mut form = ProjectForm::new();
        fill_project(&mut form, &name, &date, &tasks)?;
        let project = build(&form)?;
        with_store(|store| store.add_project(project).map_err(|err| err.to_string()))
    })();
    EntryActionResponse::from_result("create_project", "Project created.", result)
}

/// Replaces the project carrying `entry_id`, including its whole task list.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_project(
    entry_id: String,
    name: String,
    date: String,
    tasks: Vec<TaskInput>,
) -> EntryActionResponse {
    let result = (|| -> Result<EntryId, String> {
        let id = parse_id(&entry_id)?;
        with_store(|store| {
            let existing = store
                .project(id)
                .ok_or_else(|| not_found(EntryKind::Project, id))?;
            let mut form = ProjectForm::for_edit(existing);
            for task_id in form.tasks().iter().map(|task| task.id).collect::<Vec<_>>() {
                form.remove_task(task_id).map_err(|err| err.to_string())?;
            }
            fill_project(&mut form, &name, &date, &tasks)?;
            let project: Project = build(&form)?;
            store.edit_project(project).map_err(|err| err.to_string())?;
            Ok(id)
        })
    })();
    EntryActionResponse::from_result("edit_project", "Project updated.", result)
}

/// Sets one project task's completion flag.
#[flutter_rust_bridge::frb(sync)]
pub fn set_project_task_completed(
    project_id: String,
    task_id: String,
    completed: bool,
) -> EntryActionResponse {
    let result = (|| -> Result<EntryId, String> {
        let project_id = parse_id(&project_id)?;
        let task_id = parse_id(&task_id)?;
        with_store(|store| {
            store
                .set_task_completed(project_id, task_id, completed)
                .map_err(|err| err.to_string())?;
            Ok(project_id)
        })
    })();
    EntryActionResponse::from_result("set_project_task_completed", "Task updated.", result)
}

/// Deletes one entry.
///
/// Input semantics:
/// - `kind`: `project|lesson|home_task`.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_entry(kind: String, entry_id: String) -> EntryActionResponse {
    let result = (|| -> Result<EntryId, String> {
        let kind = EntryKind::parse(&kind).ok_or_else(|| format!("unknown entry kind `{kind}`"))?;
        let id = parse_id(&entry_id)?;
        with_store(|store| {
            store.remove(kind, id).map_err(|err| err.to_string())?;
            Ok(id)
        })
    })();
    EntryActionResponse::from_result("delete_entry", "Entry deleted.", result)
}

fn config() -> &'static PlannerConfig {
    CONFIG.get_or_init(PlannerConfig::from_env)
}

fn with_store<T>(
    f: impl FnOnce(&mut PlannerStore<JsonFileRepository>) -> Result<T, String>,
) -> Result<T, String> {
    let mut guard = STORE.lock().unwrap_or_else(PoisonError::into_inner);
    if guard.is_none() {
        let repo = JsonFileRepository::new(config().document_path());
        let store = PlannerStore::open(repo).map_err(|err| format!("store open failed: {err}"))?;
        *guard = Some(store);
    }
    match guard.as_mut() {
        Some(store) => f(store),
        None => Err("store unavailable".to_string()),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{raw}`; expected YYYY-MM-DD"))
}

fn parse_id(raw: &str) -> Result<EntryId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid entry id `{raw}`"))
}

fn not_found(kind: EntryKind, id: EntryId) -> String {
    warn!(
        "event=ffi_edit module=ffi status=not_found kind={} id={}",
        kind, id
    );
    format!("{kind} not found: {id}")
}

fn build<K: FormKind>(form: &EntryForm<K>) -> Result<K::Output, String> {
    form.build().map_err(|err| err.to_string())
}

fn fill_schedule<K: FormKind>(
    form: &mut EntryForm<K>,
    date: &str,
    hour: &str,
    minute: &str,
    meridiem: &str,
) -> Result<(), String> {
    form.set_date(parse_date(date)?);
    form.set_time_parts(hour, minute, meridiem)
        .map_err(|err| err.to_string())
}

fn fill_home_task(
    form: &mut HomeTaskForm,
    name: &str,
    subject_name: &str,
    date: &str,
    [hour, minute, meridiem]: [&str; 3],
    priority: &str,
) -> Result<(), String> {
    form.set_name(name);
    form.set_subject(subject_name);
    fill_schedule(form, date, hour, minute, meridiem)?;
    form.set_priority_label(priority)
        .map_err(|err| err.to_string())
}

fn fill_project(
    form: &mut ProjectForm,
    name: &str,
    date: &str,
    tasks: &[TaskInput],
) -> Result<(), String> {
    form.set_name(name);
    form.set_date(parse_date(date)?);
    for input in tasks {
        form.add_task(build_task(input)?)
            .map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn build_task(input: &TaskInput) -> Result<TaskData, String> {
    let mut form = TaskForm::new();
    form.set_name(&input.name);
    fill_schedule(
        &mut form,
        &input.date,
        &input.hour,
        &input.minute,
        &input.meridiem,
    )?;
    form.set_priority_label(&input.priority)
        .map_err(|err| err.to_string())?;
    let mut task = build(&form)?;
    if let Some(raw) = input.task_id.as_deref() {
        task.id = parse_id(raw)?;
    }
    task.is_completed = input.is_completed;
    Ok(task)
}

fn to_agenda_response(
    date: String,
    agenda: &DayAgenda,
    filter: CategoryFilter,
    sizing: PoolSizing,
) -> AgendaResponse {
    let visibility = SectionVisibility::compute(agenda, filter);
    let mut overflow = 0;
    let projects = pooled_section(visibility.projects, &agenda.projects, sizing, &mut overflow);
    let lessons = pooled_section(visibility.lessons, &agenda.lessons, sizing, &mut overflow);
    let home_tasks =
        pooled_section(visibility.home_tasks, &agenda.home_tasks, sizing, &mut overflow);

    AgendaResponse {
        ok: true,
        message: format!("{} entr(ies) on {}.", agenda.total(), date_label(agenda.date)),
        date,
        projects: projects.iter().map(to_project_item).collect(),
        lessons: lessons.iter().map(to_lesson_item).collect(),
        home_tasks: home_tasks.iter().map(to_home_task_item).collect(),
        show_empty_state: visibility.empty_state,
        overflow_count: saturating_u32(overflow),
    }
}

/// Rows a visible section shows after binding through a slot pool.
fn pooled_section<T: Clone>(
    visible: bool,
    items: &[T],
    sizing: PoolSizing,
    overflow: &mut usize,
) -> Vec<T> {
    if !visible {
        return Vec::new();
    }
    let mut pool = ItemPool::new(sizing);
    *overflow += pool.bind(items).overflow;
    pool.visible().cloned().collect()
}

fn to_project_item(project: &Project) -> ProjectItem {
    ProjectItem {
        entry_id: project.id.to_string(),
        name: project.name.clone(),
        date_label: date_label(project.date),
        progress_label: progress_label(project),
        completed_tasks: saturating_u32(project.completed_tasks()),
        total_tasks: saturating_u32(project.total_tasks()),
        tasks: project.tasks.iter().map(to_task_item).collect(),
    }
}

fn to_task_item(task: &TaskData) -> TaskItem {
    TaskItem {
        task_id: task.id.to_string(),
        name: task.name.clone(),
        time_label: time_label(task.date_time),
        priority: task.priority.label().to_string(),
        is_completed: task.is_completed,
    }
}

fn to_lesson_item(lesson: &Lesson) -> LessonItem {
    LessonItem {
        entry_id: lesson.id.to_string(),
        name: lesson.name.clone(),
        time_label: time_label(lesson.date_time),
    }
}

fn to_home_task_item(home_task: &HomeTask) -> HomeTaskItem {
    HomeTaskItem {
        entry_id: home_task.id.to_string(),
        name: home_task.name.clone(),
        subject_name: home_task.subject_name.clone(),
        time_label: time_label(home_task.date_time),
        priority: home_task.priority.label().to_string(),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
