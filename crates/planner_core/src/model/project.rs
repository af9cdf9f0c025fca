//! Project and project-task records.
//!
//! # Responsibility
//! - Define the dated project container and its ordered task list.
//! - Derive completion counters used by list rows and progress bars.
//!
//! # Invariants
//! - Every `TaskData` belongs to exactly one `Project`.
//! - Task ids are unique within their project.
//! - `progress()` is `0.0` for a project without tasks.

use crate::model::entry::{EntryId, EntryKind, Scheduled};
use crate::model::priority::Priority;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One actionable item inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskData {
    pub id: EntryId,
    pub name: String,
    pub date_time: NaiveDateTime,
    pub priority: Priority,
    #[serde(default)]
    pub is_completed: bool,
}

impl TaskData {
    /// Creates an open task with a generated stable ID.
    pub fn new(name: impl Into<String>, date_time: NaiveDateTime, priority: Priority) -> Self {
        Self::with_id(Uuid::new_v4(), name, date_time, priority)
    }

    pub fn with_id(
        id: EntryId,
        name: impl Into<String>,
        date_time: NaiveDateTime,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date_time,
            priority,
            is_completed: false,
        }
    }
}

/// A named, dated container of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    pub id: EntryId,
    pub name: String,
    pub date: NaiveDate,
    /// Serialized as `TaskDatas` to match the persisted document layout.
    #[serde(rename = "TaskDatas", default)]
    pub tasks: Vec<TaskData>,
}

impl Project {
    /// Creates an empty project with a generated stable ID.
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4(), name, date)
    }

    /// Creates an empty project with a caller-provided stable ID.
    ///
    /// Used by edit forms, where identity already exists in the store.
    pub fn with_id(id: EntryId, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            tasks: Vec::new(),
        }
    }

    pub fn total_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_completed).count()
    }

    /// Completed fraction in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        self.completed_tasks() as f32 / self.tasks.len() as f32
    }

    pub fn task(&self, task_id: EntryId) -> Option<&TaskData> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: EntryId) -> Option<&mut TaskData> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    /// First task id that appears more than once, if any.
    pub fn duplicate_task_id(&self) -> Option<EntryId> {
        let mut seen = HashSet::with_capacity(self.tasks.len());
        self.tasks
            .iter()
            .map(|task| task.id)
            .find(|id| !seen.insert(*id))
    }

    /// Tasks carrying the given priority, in list order.
    pub fn tasks_with_priority(&self, priority: Priority) -> impl Iterator<Item = &TaskData> {
        self.tasks
            .iter()
            .filter(move |task| task.priority == priority)
    }
}

impl Scheduled for Project {
    const KIND: EntryKind = EntryKind::Project;

    fn entry_id(&self) -> EntryId {
        self.id
    }

    fn scheduled_date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::{Project, TaskData};
    use crate::model::priority::Priority;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn progress_is_zero_without_tasks() {
        let project = Project::new("Essay", day());
        assert_eq!(project.completed_tasks(), 0);
        assert_eq!(project.progress(), 0.0);
    }

    #[test]
    fn progress_counts_completed_tasks() {
        let mut project = Project::new("Essay", day());
        let at = day().and_hms_opt(9, 0, 0).unwrap();
        project.tasks.push(TaskData::new("outline", at, Priority::High));
        project.tasks.push(TaskData::new("draft", at, Priority::Low));
        project.tasks[0].is_completed = true;

        assert_eq!(project.completed_tasks(), 1);
        assert_eq!(project.total_tasks(), 2);
        assert!((project.progress() - 0.5).abs() < f32::EPSILON);
        assert_eq!(project.tasks_with_priority(Priority::Low).count(), 1);
    }

    #[test]
    fn serializes_with_document_field_names() {
        let mut project = Project::new("Essay", day());
        let at = day().and_hms_opt(14, 30, 0).unwrap();
        project.tasks.push(TaskData::new("outline", at, Priority::Medium));

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["Name"], "Essay");
        assert_eq!(value["Date"], "2024-05-01");
        assert_eq!(value["TaskDatas"][0]["DateTime"], "2024-05-01T14:30:00");
        assert_eq!(value["TaskDatas"][0]["Priority"], "Medium");
        assert_eq!(value["TaskDatas"][0]["IsCompleted"], false);
    }

    #[test]
    fn duplicate_task_id_reports_repeated_ids() {
        let mut project = Project::new("Essay", day());
        let at = day().and_hms_opt(9, 0, 0).unwrap();
        let outline = TaskData::new("outline", at, Priority::High);
        project.tasks.push(outline.clone());
        project.tasks.push(TaskData::new("draft", at, Priority::Low));
        assert_eq!(project.duplicate_task_id(), None);

        project.tasks.push(outline.clone());
        assert_eq!(project.duplicate_task_id(), Some(outline.id));
    }
}
