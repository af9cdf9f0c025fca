use chrono::{NaiveDate, NaiveDateTime};
use planner_core::{
    ChangeKind, EntryKind, HomeTask, Lesson, MemoryRepository, PlannerStore, Priority, Project,
    StoreError, StoreEvent, TaskData,
};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn at(day_of_month: u32, hour: u32, minute: u32) -> NaiveDateTime {
    day(day_of_month).and_hms_opt(hour, minute, 0).unwrap()
}

fn open_store() -> (PlannerStore<MemoryRepository>, MemoryRepository) {
    let repo = MemoryRepository::new();
    let store = PlannerStore::open(repo.clone()).unwrap();
    (store, repo)
}

fn essay_project() -> Project {
    let mut project = Project::new("Essay", day(1));
    project
        .tasks
        .push(TaskData::new("outline", at(1, 10, 0), Priority::High));
    project
        .tasks
        .push(TaskData::new("draft", at(1, 16, 0), Priority::Medium));
    project
}

#[test]
fn added_entries_are_present_and_persisted() {
    let (mut store, repo) = open_store();

    let project_id = store.add_project(essay_project()).unwrap();
    let lesson_id = store.add_lesson(Lesson::new("Math", at(1, 14, 30))).unwrap();
    let home_task_id = store
        .add_home_task(HomeTask::new(
            "worksheet",
            "Physics",
            at(1, 18, 0),
            Priority::Low,
        ))
        .unwrap();

    assert_eq!(store.project(project_id).unwrap().name, "Essay");
    assert_eq!(store.lesson(lesson_id).unwrap().name, "Math");
    assert_eq!(store.home_task(home_task_id).unwrap().subject_name, "Physics");

    let saved = repo.saved_document().unwrap();
    assert_eq!(saved.entry_count(), 3);
    assert_eq!(repo.save_count(), 3);
}

#[test]
fn removed_entries_are_absent() {
    let (mut store, _repo) = open_store();
    let project_id = store.add_project(essay_project()).unwrap();
    let lesson_id = store.add_lesson(Lesson::new("Math", at(1, 9, 0))).unwrap();

    let removed = store.remove_project(project_id).unwrap();
    assert_eq!(removed.id, project_id);
    store.remove(EntryKind::Lesson, lesson_id).unwrap();

    assert!(store.project(project_id).is_none());
    assert!(store.lesson(lesson_id).is_none());
    assert!(!store.has_data_for_date(day(1)));
}

#[test]
fn query_by_date_excludes_adjacent_days() {
    let (mut store, _repo) = open_store();
    store.add_lesson(Lesson::new("late", at(1, 23, 59))).unwrap();
    store.add_lesson(Lesson::new("early", at(2, 0, 0))).unwrap();
    store.add_lesson(Lesson::new("noon", at(2, 12, 0))).unwrap();
    store.add_lesson(Lesson::new("tomorrow", at(3, 0, 0))).unwrap();
    store.add_project(Project::new("Essay", day(2))).unwrap();

    let agenda = store.query_by_date(day(2));
    let names = agenda
        .lessons
        .iter()
        .map(|lesson| lesson.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["early", "noon"]);
    assert_eq!(agenda.projects.len(), 1);
    assert!(agenda.home_tasks.is_empty());
    assert_eq!(agenda.total(), 3);

    assert!(store.has_data_for_date(day(1)));
    assert!(!store.has_data_for_date(day(4)));
    assert!(store.query_by_date(day(4)).is_empty());
}

#[test]
fn edit_replaces_entry_in_place_by_id() {
    let (mut store, _repo) = open_store();
    let first = store.add_lesson(Lesson::new("Math", at(1, 9, 0))).unwrap();
    store.add_lesson(Lesson::new("Biology", at(1, 11, 0))).unwrap();

    let mut edited = store.lesson(first).unwrap().clone();
    edited.name = "Algebra".to_string();
    edited.date_time = at(2, 9, 15);
    store.edit_lesson(edited).unwrap();

    assert_eq!(store.lessons()[0].id, first);
    assert_eq!(store.lessons()[0].name, "Algebra");
    assert_eq!(store.lessons().len(), 2);
    assert!(store.query_by_date(day(2)).lessons.iter().any(|l| l.id == first));
}

#[test]
fn edit_and_remove_of_missing_target_return_not_found() {
    let (mut store, repo) = open_store();
    store.add_lesson(Lesson::new("Math", at(1, 9, 0))).unwrap();
    let saves_before = repo.save_count();
    let ghost = Uuid::new_v4();

    let err = store
        .edit_home_task(HomeTask::with_id(
            ghost,
            "ghost",
            "None",
            at(1, 9, 0),
            Priority::Low,
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound { kind: EntryKind::HomeTask, id } if id == ghost
    ));

    let err = store.remove(EntryKind::Project, ghost).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: EntryKind::Project, .. }));

    assert_eq!(repo.save_count(), saves_before);
    assert_eq!(store.lessons().len(), 1);
}

#[test]
fn set_task_completed_updates_progress() {
    let (mut store, _repo) = open_store();
    let project = essay_project();
    let task_id = project.tasks[0].id;
    let project_id = store.add_project(project).unwrap();

    store.set_task_completed(project_id, task_id, true).unwrap();
    let stored = store.project(project_id).unwrap();
    assert_eq!(stored.completed_tasks(), 1);
    assert_eq!(stored.total_tasks(), 2);
    assert!((stored.progress() - 0.5).abs() < f32::EPSILON);

    let err = store
        .set_task_completed(project_id, Uuid::new_v4(), true)
        .unwrap_err();
    assert!(matches!(err, StoreError::TaskNotFound { .. }));
}

#[test]
fn subscribers_see_each_successful_mutation_once() {
    let (mut store, _repo) = open_store();
    let events: Arc<Mutex<Vec<StoreEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    store.subscribe(move |event| sink.lock().unwrap().push(*event));

    let id = store.add_lesson(Lesson::new("Math", at(1, 9, 0))).unwrap();
    let mut lesson = store.lesson(id).unwrap().clone();
    lesson.name = "Geometry".to_string();
    store.edit_lesson(lesson).unwrap();
    store.remove_lesson(id).unwrap();
    let _ = store.remove_lesson(id);

    let changes = events
        .lock()
        .unwrap()
        .iter()
        .map(|event| (event.kind, event.id, event.change))
        .collect::<Vec<_>>();
    assert_eq!(
        changes,
        vec![
            (EntryKind::Lesson, id, ChangeKind::Added),
            (EntryKind::Lesson, id, ChangeKind::Edited),
            (EntryKind::Lesson, id, ChangeKind::Removed),
        ]
    );
}

#[test]
fn failed_save_leaves_state_and_subscribers_untouched() {
    let (mut store, repo) = open_store();
    let id = store.add_lesson(Lesson::new("Math", at(1, 9, 0))).unwrap();
    let notified = Arc::new(Mutex::new(0_usize));
    let counter = Arc::clone(&notified);
    store.subscribe(move |_| *counter.lock().unwrap() += 1);

    repo.set_fail_saves(true);
    let err = store
        .add_project(essay_project())
        .expect_err("save failure must surface");
    assert!(matches!(err, StoreError::Repo(_)));
    assert!(store.remove_lesson(id).is_err());

    assert!(store.projects().is_empty());
    assert!(store.lesson(id).is_some());
    assert_eq!(*notified.lock().unwrap(), 0);
    assert_eq!(repo.saved_document().unwrap().entry_count(), 1);

    repo.set_fail_saves(false);
    store.remove_lesson(id).unwrap();
    assert_eq!(*notified.lock().unwrap(), 1);
}

#[test]
fn projects_with_repeated_task_ids_are_rejected() {
    let (mut store, repo) = open_store();
    let mut project = essay_project();
    let repeated = project.tasks[0].clone();
    project.tasks.push(repeated.clone());

    let err = store.add_project(project.clone()).unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateTaskId { project_id, task_id }
            if project_id == project.id && task_id == repeated.id
    ));
    assert!(store.projects().is_empty());
    assert_eq!(repo.save_count(), 0);

    let project_id = store.add_project(essay_project()).unwrap();
    let mut edited = store.project(project_id).unwrap().clone();
    let first = edited.tasks[0].clone();
    edited.tasks.push(first);
    assert!(matches!(
        store.edit_project(edited),
        Err(StoreError::DuplicateTaskId { .. })
    ));
    assert_eq!(store.project(project_id).unwrap().total_tasks(), 2);
    assert_eq!(repo.save_count(), 1);
}
