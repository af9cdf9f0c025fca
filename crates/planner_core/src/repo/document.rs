//! Persisted planner document layout and schema version guard.
//!
//! # Responsibility
//! - Define the single JSON document holding every collection.
//! - Track the schema version written by this binary.
//!
//! # Invariants
//! - The document is always written whole; there are no partial records.
//! - A document without `SchemaVersion` is treated as version 1.
//! - A binary never accepts a document newer than `CURRENT_SCHEMA_VERSION`.

use crate::model::home_task::HomeTask;
use crate::model::lesson::Lesson;
use crate::model::project::Project;
use serde::{Deserialize, Serialize};

/// Schema version written by this binary.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    1
}

/// Whole-store document: three ordered collections plus a version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlannerDocument {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub home_tasks: Vec<HomeTask>,
}

impl Default for PlannerDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            projects: Vec::new(),
            lessons: Vec::new(),
            home_tasks: Vec::new(),
        }
    }
}

impl PlannerDocument {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.lessons.is_empty() && self.home_tasks.is_empty()
    }

    /// Total number of top-level records.
    pub fn entry_count(&self) -> usize {
        self.projects.len() + self.lessons.len() + self.home_tasks.len()
    }
}

/// Version-only view used before committing to a full parse.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SchemaHeader {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
}
