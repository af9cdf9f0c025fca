use chrono::NaiveDate;
use planner_core::{
    DocumentRepository, JsonFileRepository, Lesson, PlannerStore, Priority, Project, RepoError,
    StoreError, TaskData, CURRENT_SCHEMA_VERSION,
};
use serde_json::Value;
use std::fs;

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

#[test]
fn missing_file_opens_empty_and_first_save_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("planner_data.json");

    let mut store = PlannerStore::open(JsonFileRepository::new(&path)).unwrap();
    assert!(store.document().is_empty());
    assert!(!path.exists());

    store
        .add_lesson(Lesson::new("Math", may(1).and_hms_opt(9, 0, 0).unwrap()))
        .unwrap();
    assert!(path.exists());
    assert!(!dir.path().join("nested").join("planner_data.json.tmp").exists());
}

#[test]
fn reopened_store_keeps_entries_and_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner_data.json");

    let mut project = Project::new("Essay", may(1));
    let task = TaskData::new(
        "outline",
        may(1).and_hms_opt(10, 0, 0).unwrap(),
        Priority::High,
    );
    let task_id = task.id;
    project.tasks.push(task);

    let (project_id, lesson_id) = {
        let mut store = PlannerStore::open(JsonFileRepository::new(&path)).unwrap();
        let project_id = store.add_project(project).unwrap();
        let lesson_id = store
            .add_lesson(Lesson::new("Math", may(1).and_hms_opt(14, 30, 0).unwrap()))
            .unwrap();
        store.set_task_completed(project_id, task_id, true).unwrap();
        (project_id, lesson_id)
    };

    let reopened = PlannerStore::open(JsonFileRepository::new(&path)).unwrap();
    let stored = reopened.project(project_id).unwrap();
    assert_eq!(stored.tasks[0].id, task_id);
    assert!(stored.tasks[0].is_completed);
    assert_eq!(reopened.lesson(lesson_id).unwrap().name, "Math");
    assert!(reopened.has_data_for_date(may(1)));
}

#[test]
fn edits_and_removes_after_reload_survive_another_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner_data.json");

    let (project_id, lesson_id, kept_project_id) = {
        let mut store = PlannerStore::open(JsonFileRepository::new(&path)).unwrap();
        let project_id = store.add_project(Project::new("Essay", may(1))).unwrap();
        let kept_project_id = store.add_project(Project::new("Lab report", may(1))).unwrap();
        let lesson_id = store
            .add_lesson(Lesson::new("Math", may(1).and_hms_opt(14, 30, 0).unwrap()))
            .unwrap();
        (project_id, lesson_id, kept_project_id)
    };

    {
        let mut store = PlannerStore::open(JsonFileRepository::new(&path)).unwrap();
        let mut lesson = store.lesson(lesson_id).unwrap().clone();
        lesson.date_time = may(2).and_hms_opt(9, 15, 0).unwrap();
        store.edit_lesson(lesson).unwrap();
        store.remove_project(project_id).unwrap();
    }

    let reopened = PlannerStore::open(JsonFileRepository::new(&path)).unwrap();
    let lesson = reopened.lesson(lesson_id).unwrap();
    assert_eq!(lesson.date_time, may(2).and_hms_opt(9, 15, 0).unwrap());
    assert_eq!(reopened.lessons().len(), 1);
    assert!(reopened.project(project_id).is_none());
    assert_eq!(reopened.project(kept_project_id).unwrap().name, "Lab report");
    assert!(!reopened.query_by_date(may(1)).lessons.iter().any(|l| l.id == lesson_id));
}

#[test]
fn persisted_document_uses_pascal_case_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner_data.json");
    let mut store = PlannerStore::open(JsonFileRepository::new(&path)).unwrap();

    let mut project = Project::new("Essay", may(1));
    project.tasks.push(TaskData::new(
        "outline",
        may(1).and_hms_opt(10, 0, 0).unwrap(),
        Priority::Medium,
    ));
    store.add_project(project).unwrap();

    let value: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(value["SchemaVersion"], CURRENT_SCHEMA_VERSION);
    assert_eq!(value["Projects"][0]["Name"], "Essay");
    assert_eq!(value["Projects"][0]["Date"], "2024-05-01");
    assert_eq!(
        value["Projects"][0]["TaskDatas"][0]["DateTime"],
        "2024-05-01T10:00:00"
    );
    assert_eq!(value["Projects"][0]["TaskDatas"][0]["Priority"], "Medium");
    assert!(value["Lessons"].as_array().unwrap().is_empty());
    assert!(value["HomeTasks"].as_array().unwrap().is_empty());
}

#[test]
fn corrupt_file_opens_as_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner_data.json");
    fs::write(&path, b"{ this is not json").unwrap();

    let repo = JsonFileRepository::new(&path);
    assert!(matches!(repo.load(), Err(RepoError::Corrupt(_))));

    let mut store = PlannerStore::open(repo).unwrap();
    assert!(store.document().is_empty());

    store.add_project(Project::new("Essay", may(2))).unwrap();
    let reopened = PlannerStore::open(JsonFileRepository::new(&path)).unwrap();
    assert_eq!(reopened.projects().len(), 1);
}

#[test]
fn newer_schema_is_refused_and_file_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner_data.json");
    let original = br#"{"SchemaVersion": 42, "Projects": [], "Future": true}"#;
    fs::write(&path, original).unwrap();

    let err = PlannerStore::open(JsonFileRepository::new(&path))
        .err()
        .expect("newer schema must not open");
    assert!(matches!(
        err,
        StoreError::UnsupportedSchemaVersion { found: 42, .. }
    ));
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn document_without_version_or_arrays_loads_as_version_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner_data.json");
    fs::write(
        &path,
        br#"{"Lessons": [{"Id": "6f1c2a8e-0f5e-4b7a-9a57-3d1f0f0c1b2a", "Name": "Math", "DateTime": "2024-05-01T14:30:00"}]}"#,
    )
    .unwrap();

    let store = PlannerStore::open(JsonFileRepository::new(&path)).unwrap();
    assert_eq!(store.document().schema_version, 1);
    assert_eq!(store.lessons().len(), 1);
    assert!(!store.lessons()[0].is_expanded);
    assert!(store.projects().is_empty());
}
