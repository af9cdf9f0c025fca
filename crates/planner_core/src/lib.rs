//! Core domain logic for the student planner.
//! This crate is the single source of truth for entry data and its rules.

pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::PlannerConfig;
pub use form::entry_form::{EntryForm, FormError, FormKind};
pub use form::kinds::{
    HomeTaskForm, HomeTaskKind, LessonForm, LessonKind, ProjectForm, ProjectKind, TaskForm,
    TaskKind,
};
pub use form::rules::{FormDraft, FormField};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::agenda::DayAgenda;
pub use model::clock::{ClockError, ClockTime, Meridiem};
pub use model::entry::{EntryId, EntryKind, Scheduled};
pub use model::home_task::HomeTask;
pub use model::lesson::Lesson;
pub use model::priority::{Priority, UnknownPriority};
pub use model::project::{Project, TaskData};
pub use repo::document::{PlannerDocument, CURRENT_SCHEMA_VERSION};
pub use repo::document_repo::{
    DocumentRepository, JsonFileRepository, MemoryRepository, RepoError, RepoResult,
};
pub use service::planner_store::{
    ChangeKind, PlannerStore, StoreError, StoreEvent, StoreResult, SubscriptionId,
};
pub use view::calendar::{CalendarDay, CalendarWeek, DayRelation};
pub use view::filter::{CategoryFilter, SectionVisibility};
pub use view::pool::{BindOutcome, ItemPool, PoolSizing};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
