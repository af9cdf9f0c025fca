//! Planner store: in-memory collections backed by one persisted document.
//!
//! # Responsibility
//! - Provide id-keyed add/edit/remove over projects, lessons and home tasks.
//! - Answer per-day queries for the calendar and the main screen.
//! - Broadcast change notifications to subscribers.
//!
//! # Invariants
//! - Every mutation is staged on a copy, saved whole, then swapped in.
//!   A failed save leaves memory, disk and subscribers untouched.
//! - Subscribers are notified only after the new document is persisted.
//! - A stored project never lists the same task id twice.
//! - Edit/remove targets are located by `EntryId`; a missing target is an
//!   error (`NotFound`), never a silent no-op.
//! - Date queries compare the calendar day only; time of day is ignored.
//! - All mutations take `&mut self`: the store has exactly one writer.

use crate::model::agenda::DayAgenda;
use crate::model::entry::{EntryId, EntryKind, Scheduled};
use crate::model::home_task::HomeTask;
use crate::model::lesson::Lesson;
use crate::model::project::Project;
use crate::repo::document::PlannerDocument;
use crate::repo::document_repo::{DocumentRepository, RepoError};
use chrono::{Local, NaiveDate};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for planner mutations.
#[derive(Debug)]
pub enum StoreError {
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Edit/remove target does not exist.
    NotFound { kind: EntryKind, id: EntryId },
    /// Task does not exist inside the given project.
    TaskNotFound {
        project_id: EntryId,
        task_id: EntryId,
    },
    /// Add was called with an id that is already stored.
    DuplicateId { kind: EntryKind, id: EntryId },
    /// Project lists the same task id more than once.
    DuplicateTaskId {
        project_id: EntryId,
        task_id: EntryId,
    },
    /// Persisted document was written by a newer binary.
    UnsupportedSchemaVersion { found: u32, latest_supported: u32 },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::TaskNotFound {
                project_id,
                task_id,
            } => write!(f, "task {task_id} not found in project {project_id}"),
            Self::DuplicateId { kind, id } => write!(f, "{kind} already exists: {id}"),
            Self::DuplicateTaskId {
                project_id,
                task_id,
            } => write!(f, "task {task_id} appears twice in project {project_id}"),
            Self::UnsupportedSchemaVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "planner document schema version {found} is newer than supported {latest_supported}; refusing to open"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::UnsupportedSchemaVersion {
                found,
                latest_supported,
            } => Self::UnsupportedSchemaVersion {
                found,
                latest_supported,
            },
            other => Self::Repo(other),
        }
    }
}

/// What happened to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Edited,
    Removed,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Edited => "edited",
            Self::Removed => "removed",
        }
    }
}

/// Change notification delivered to subscribers after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    pub kind: EntryKind,
    pub id: EntryId,
    pub change: ChangeKind,
}

/// Handle returned by [`PlannerStore::subscribe`].
pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&StoreEvent) + Send>;

/// Store facade over a document repository.
pub struct PlannerStore<R: DocumentRepository> {
    repo: R,
    document: PlannerDocument,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl<R: DocumentRepository> PlannerStore<R> {
    /// Loads the persisted document once.
    ///
    /// A missing, unreadable or malformed document yields an empty store; the
    /// failure is logged, not returned.
    ///
    /// # Errors
    /// - `UnsupportedSchemaVersion` when the document was written by a newer
    ///   binary.
    pub fn open(repo: R) -> StoreResult<Self> {
        let document = match repo.load() {
            Ok(Some(document)) => {
                info!(
                    "event=store_open module=store status=ok projects={} lessons={} home_tasks={}",
                    document.projects.len(),
                    document.lessons.len(),
                    document.home_tasks.len()
                );
                document
            }
            Ok(None) => {
                info!("event=store_open module=store status=empty reason=missing");
                PlannerDocument::default()
            }
            Err(err @ RepoError::UnsupportedSchemaVersion { .. }) => {
                error!(
                    "event=store_open module=store status=error error_code=unsupported_schema error={}",
                    err
                );
                return Err(err.into());
            }
            Err(err) => {
                warn!(
                    "event=store_open module=store status=reset reason=load_failed error={}",
                    err
                );
                PlannerDocument::default()
            }
        };

        Ok(Self {
            repo,
            document,
            listeners: Vec::new(),
            next_subscription: 1,
        })
    }

    /// Full in-memory document.
    pub fn document(&self) -> &PlannerDocument {
        &self.document
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn projects(&self) -> &[Project] {
        &self.document.projects
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.document.lessons
    }

    pub fn home_tasks(&self) -> &[HomeTask] {
        &self.document.home_tasks
    }

    pub fn project(&self, id: EntryId) -> Option<&Project> {
        find_entry(&self.document.projects, id)
    }

    pub fn lesson(&self, id: EntryId) -> Option<&Lesson> {
        find_entry(&self.document.lessons, id)
    }

    pub fn home_task(&self, id: EntryId) -> Option<&HomeTask> {
        find_entry(&self.document.home_tasks, id)
    }

    /// # Errors
    /// - `DuplicateTaskId` when two of the project's tasks share an id.
    pub fn add_project(&mut self, project: Project) -> StoreResult<EntryId> {
        self.mutate(|document| {
            check_unique_tasks(&project)?;
            insert_entry(&mut document.projects, project)
        })
    }

    pub fn add_lesson(&mut self, lesson: Lesson) -> StoreResult<EntryId> {
        self.mutate(|document| insert_entry(&mut document.lessons, lesson))
    }

    pub fn add_home_task(&mut self, home_task: HomeTask) -> StoreResult<EntryId> {
        self.mutate(|document| insert_entry(&mut document.home_tasks, home_task))
    }

    /// Replaces the stored project carrying `project.id`, keeping its position.
    pub fn edit_project(&mut self, project: Project) -> StoreResult<()> {
        self.mutate(|document| {
            check_unique_tasks(&project)?;
            replace_entry(&mut document.projects, project)
        })
    }

    pub fn edit_lesson(&mut self, lesson: Lesson) -> StoreResult<()> {
        self.mutate(|document| replace_entry(&mut document.lessons, lesson))
    }

    pub fn edit_home_task(&mut self, home_task: HomeTask) -> StoreResult<()> {
        self.mutate(|document| replace_entry(&mut document.home_tasks, home_task))
    }

    pub fn remove_project(&mut self, id: EntryId) -> StoreResult<Project> {
        self.mutate(|document| take_entry(&mut document.projects, id))
    }

    pub fn remove_lesson(&mut self, id: EntryId) -> StoreResult<Lesson> {
        self.mutate(|document| take_entry(&mut document.lessons, id))
    }

    pub fn remove_home_task(&mut self, id: EntryId) -> StoreResult<HomeTask> {
        self.mutate(|document| take_entry(&mut document.home_tasks, id))
    }

    /// Removes one entry of any kind by id.
    pub fn remove(&mut self, kind: EntryKind, id: EntryId) -> StoreResult<()> {
        match kind {
            EntryKind::Project => self.remove_project(id).map(|_| ()),
            EntryKind::Lesson => self.remove_lesson(id).map(|_| ()),
            EntryKind::HomeTask => self.remove_home_task(id).map(|_| ()),
        }
    }

    /// Flips one project task's completion flag and persists the project.
    ///
    /// Setting the flag to its current value still saves and notifies.
    pub fn set_task_completed(
        &mut self,
        project_id: EntryId,
        task_id: EntryId,
        completed: bool,
    ) -> StoreResult<()> {
        self.mutate(|document| {
            let project = document
                .projects
                .iter_mut()
                .find(|project| project.id == project_id)
                .ok_or(StoreError::NotFound {
                    kind: EntryKind::Project,
                    id: project_id,
                })?;
            let task = project
                .task_mut(task_id)
                .ok_or(StoreError::TaskNotFound {
                    project_id,
                    task_id,
                })?;
            task.is_completed = completed;
            Ok((
                StoreEvent {
                    kind: EntryKind::Project,
                    id: project_id,
                    change: ChangeKind::Edited,
                },
                (),
            ))
        })
    }

    /// Entries whose calendar day equals `date`, in store order.
    pub fn query_by_date(&self, date: NaiveDate) -> DayAgenda {
        DayAgenda {
            date,
            projects: entries_on(&self.document.projects, date),
            lessons: entries_on(&self.document.lessons, date),
            home_tasks: entries_on(&self.document.home_tasks, date),
        }
    }

    pub fn has_data_for_date(&self, date: NaiveDate) -> bool {
        any_on(&self.document.projects, date)
            || any_on(&self.document.lessons, date)
            || any_on(&self.document.home_tasks, date)
    }

    /// Agenda for the local current day.
    pub fn today(&self) -> DayAgenda {
        self.query_by_date(Local::now().date_naive())
    }

    /// Registers a change listener; it runs after every successful mutation.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StoreEvent) + Send + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(subscription, _)| *subscription != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn mutate<T>(
        &mut self,
        apply: impl FnOnce(&mut PlannerDocument) -> StoreResult<(StoreEvent, T)>,
    ) -> StoreResult<T> {
        let started_at = Instant::now();
        let mut staged = self.document.clone();
        let (event, output) = match apply(&mut staged) {
            Ok(applied) => applied,
            Err(err) => {
                warn!(
                    "event=store_mutation module=store status=rejected error={}",
                    err
                );
                return Err(err);
            }
        };

        if let Err(err) = self.repo.save(&staged) {
            error!(
                "event=store_mutation module=store status=error kind={} change={} id={} error_code=save_failed error={}",
                event.kind,
                event.change.as_str(),
                event.id,
                err
            );
            return Err(err.into());
        }

        self.document = staged;
        info!(
            "event=store_mutation module=store status=ok kind={} change={} id={} duration_ms={}",
            event.kind,
            event.change.as_str(),
            event.id,
            started_at.elapsed().as_millis()
        );

        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
        Ok(output)
    }
}

fn check_unique_tasks(project: &Project) -> StoreResult<()> {
    match project.duplicate_task_id() {
        Some(task_id) => Err(StoreError::DuplicateTaskId {
            project_id: project.id,
            task_id,
        }),
        None => Ok(()),
    }
}

fn find_entry<T: Scheduled>(items: &[T], id: EntryId) -> Option<&T> {
    items.iter().find(|item| item.entry_id() == id)
}

fn insert_entry<T: Scheduled>(
    items: &mut Vec<T>,
    item: T,
) -> StoreResult<(StoreEvent, EntryId)> {
    let id = item.entry_id();
    if find_entry(items, id).is_some() {
        return Err(StoreError::DuplicateId { kind: T::KIND, id });
    }
    items.push(item);
    Ok((
        StoreEvent {
            kind: T::KIND,
            id,
            change: ChangeKind::Added,
        },
        id,
    ))
}

fn replace_entry<T: Scheduled>(items: &mut [T], item: T) -> StoreResult<(StoreEvent, ())> {
    let id = item.entry_id();
    let slot = items
        .iter_mut()
        .find(|existing| existing.entry_id() == id)
        .ok_or(StoreError::NotFound { kind: T::KIND, id })?;
    *slot = item;
    Ok((
        StoreEvent {
            kind: T::KIND,
            id,
            change: ChangeKind::Edited,
        },
        (),
    ))
}

fn take_entry<T: Scheduled>(items: &mut Vec<T>, id: EntryId) -> StoreResult<(StoreEvent, T)> {
    let index = items
        .iter()
        .position(|item| item.entry_id() == id)
        .ok_or(StoreError::NotFound { kind: T::KIND, id })?;
    let removed = items.remove(index);
    Ok((
        StoreEvent {
            kind: T::KIND,
            id,
            change: ChangeKind::Removed,
        },
        removed,
    ))
}

fn entries_on<T: Scheduled + Clone>(items: &[T], date: NaiveDate) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.scheduled_date() == date)
        .cloned()
        .collect()
}

fn any_on<T: Scheduled>(items: &[T], date: NaiveDate) -> bool {
    items.iter().any(|item| item.scheduled_date() == date)
}
