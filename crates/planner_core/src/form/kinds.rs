//! Rule tables and record assembly for each form.
//!
//! | Form | Required fields |
//! |---|---|
//! | Project | name, date, at least one task |
//! | Project task | name, date, time, priority |
//! | Lesson | name, date, time |
//! | Home task | name, subject, date, time, priority |

use crate::form::entry_form::{EntryForm, FormError, FormKind};
use crate::form::rules::{
    date_chosen, has_tasks, name_present, priority_chosen, subject_present, time_chosen,
    FieldRule, FormDraft, FormField,
};
use crate::model::clock::ClockTime;
use crate::model::entry::EntryId;
use crate::model::home_task::HomeTask;
use crate::model::lesson::Lesson;
use crate::model::project::{Project, TaskData};
use chrono::NaiveDateTime;
use uuid::Uuid;

const NAME: FieldRule = FieldRule::new(FormField::Name, name_present);
const SUBJECT: FieldRule = FieldRule::new(FormField::Subject, subject_present);
const DATE: FieldRule = FieldRule::new(FormField::Date, date_chosen);
const TIME: FieldRule = FieldRule::new(FormField::Time, time_chosen);
const PRIORITY: FieldRule = FieldRule::new(FormField::Priority, priority_chosen);
const TASKS: FieldRule = FieldRule::new(FormField::Tasks, has_tasks);

fn scheduled_at(draft: &FormDraft) -> Option<NaiveDateTime> {
    let date = draft.date?;
    let clock = draft.clock?;
    Some(date.and_time(clock.to_naive_time()))
}

fn prefill_moment(draft: &mut FormDraft, moment: NaiveDateTime) {
    draft.date = Some(moment.date());
    draft.clock = Some(ClockTime::from_naive_time(moment.time()));
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectKind;

impl FormKind for ProjectKind {
    type Output = Project;
    const RULES: &'static [FieldRule] = &[NAME, DATE, TASKS];

    fn assemble(draft: &FormDraft, id: Option<EntryId>) -> Option<Project> {
        let mut project = Project::with_id(
            id.unwrap_or_else(Uuid::new_v4),
            draft.name.trim(),
            draft.date?,
        );
        project.tasks = draft.tasks.clone();
        Some(project)
    }

    fn prefill(existing: &Project) -> FormDraft {
        FormDraft {
            name: existing.name.clone(),
            date: Some(existing.date),
            tasks: existing.tasks.clone(),
            ..FormDraft::default()
        }
    }

    fn id_of(existing: &Project) -> EntryId {
        existing.id
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TaskKind;

impl FormKind for TaskKind {
    type Output = TaskData;
    const RULES: &'static [FieldRule] = &[NAME, DATE, TIME, PRIORITY];

    fn assemble(draft: &FormDraft, id: Option<EntryId>) -> Option<TaskData> {
        let mut task = TaskData::with_id(
            id.unwrap_or_else(Uuid::new_v4),
            draft.name.trim(),
            scheduled_at(draft)?,
            draft.priority?,
        );
        task.is_completed = draft.is_completed;
        Some(task)
    }

    fn prefill(existing: &TaskData) -> FormDraft {
        let mut draft = FormDraft {
            name: existing.name.clone(),
            priority: Some(existing.priority),
            is_completed: existing.is_completed,
            ..FormDraft::default()
        };
        prefill_moment(&mut draft, existing.date_time);
        draft
    }

    fn id_of(existing: &TaskData) -> EntryId {
        existing.id
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LessonKind;

impl FormKind for LessonKind {
    type Output = Lesson;
    const RULES: &'static [FieldRule] = &[NAME, DATE, TIME];

    fn assemble(draft: &FormDraft, id: Option<EntryId>) -> Option<Lesson> {
        Some(Lesson::with_id(
            id.unwrap_or_else(Uuid::new_v4),
            draft.name.trim(),
            scheduled_at(draft)?,
        ))
    }

    fn prefill(existing: &Lesson) -> FormDraft {
        let mut draft = FormDraft {
            name: existing.name.clone(),
            ..FormDraft::default()
        };
        prefill_moment(&mut draft, existing.date_time);
        draft
    }

    fn id_of(existing: &Lesson) -> EntryId {
        existing.id
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HomeTaskKind;

impl FormKind for HomeTaskKind {
    type Output = HomeTask;
    const RULES: &'static [FieldRule] = &[NAME, SUBJECT, DATE, TIME, PRIORITY];

    fn assemble(draft: &FormDraft, id: Option<EntryId>) -> Option<HomeTask> {
        Some(HomeTask::with_id(
            id.unwrap_or_else(Uuid::new_v4),
            draft.name.trim(),
            draft.subject.trim(),
            scheduled_at(draft)?,
            draft.priority?,
        ))
    }

    fn prefill(existing: &HomeTask) -> FormDraft {
        let mut draft = FormDraft {
            name: existing.name.clone(),
            subject: existing.subject_name.clone(),
            priority: Some(existing.priority),
            ..FormDraft::default()
        };
        prefill_moment(&mut draft, existing.date_time);
        draft
    }

    fn id_of(existing: &HomeTask) -> EntryId {
        existing.id
    }
}

pub type ProjectForm = EntryForm<ProjectKind>;
pub type TaskForm = EntryForm<TaskKind>;
pub type LessonForm = EntryForm<LessonKind>;
pub type HomeTaskForm = EntryForm<HomeTaskKind>;

impl EntryForm<ProjectKind> {
    pub fn tasks(&self) -> &[TaskData] {
        &self.draft().tasks
    }

    /// Appends a task built by a [`TaskForm`].
    ///
    /// A task whose id is already in the draft is rejected; use
    /// [`replace_task`](Self::replace_task) to edit it.
    pub fn add_task(&mut self, task: TaskData) -> Result<(), FormError> {
        let tasks = &mut self.draft_mut().tasks;
        if tasks.iter().any(|existing| existing.id == task.id) {
            return Err(FormError::DuplicateTask(task.id));
        }
        tasks.push(task);
        self.revalidate();
        Ok(())
    }

    /// Replaces the draft task carrying `task.id`, keeping its position.
    pub fn replace_task(&mut self, task: TaskData) -> Result<(), FormError> {
        let slot = self
            .draft_mut()
            .tasks
            .iter_mut()
            .find(|existing| existing.id == task.id)
            .ok_or(FormError::UnknownTask(task.id))?;
        *slot = task;
        self.revalidate();
        Ok(())
    }

    pub fn remove_task(&mut self, task_id: EntryId) -> Result<TaskData, FormError> {
        let tasks = &mut self.draft_mut().tasks;
        let index = tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or(FormError::UnknownTask(task_id))?;
        let removed = tasks.remove(index);
        self.revalidate();
        Ok(removed)
    }
}
