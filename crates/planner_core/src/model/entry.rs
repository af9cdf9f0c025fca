//! Shared identity and scheduling contracts for planner entries.
//!
//! # Responsibility
//! - Define the stable identifier used by every stored record.
//! - Name the three top-level collections held by the store.
//!
//! # Invariants
//! - An `EntryId` is generated once at creation and never reused.
//! - `scheduled_date()` is the only value consulted by date queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for projects, project tasks, lessons and home tasks.
pub type EntryId = Uuid;

/// Top-level collection an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Project,
    Lesson,
    HomeTask,
}

impl EntryKind {
    /// Stable lowercase label used in logs and FFI envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Lesson => "lesson",
            Self::HomeTask => "home_task",
        }
    }

    /// Parses the label produced by [`EntryKind::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "project" => Some(Self::Project),
            "lesson" => Some(Self::Lesson),
            "home_task" => Some(Self::HomeTask),
            _ => None,
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored record that can be located by id and grouped by calendar day.
pub trait Scheduled {
    /// Collection the record lives in.
    const KIND: EntryKind;

    fn entry_id(&self) -> EntryId;

    /// Calendar day of the record; time of day is ignored by queries.
    fn scheduled_date(&self) -> NaiveDate;
}
