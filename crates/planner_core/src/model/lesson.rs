//! Lesson record.

use crate::model::entry::{EntryId, EntryKind, Scheduled};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A standalone dated lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lesson {
    pub id: EntryId,
    pub name: String,
    pub date_time: NaiveDateTime,
    /// Row expansion state; persisted but never consulted by the store.
    #[serde(default)]
    pub is_expanded: bool,
}

impl Lesson {
    pub fn new(name: impl Into<String>, date_time: NaiveDateTime) -> Self {
        Self::with_id(Uuid::new_v4(), name, date_time)
    }

    pub fn with_id(id: EntryId, name: impl Into<String>, date_time: NaiveDateTime) -> Self {
        Self {
            id,
            name: name.into(),
            date_time,
            is_expanded: false,
        }
    }
}

impl Scheduled for Lesson {
    const KIND: EntryKind = EntryKind::Lesson;

    fn entry_id(&self) -> EntryId {
        self.id
    }

    fn scheduled_date(&self) -> NaiveDate {
        self.date_time.date()
    }
}
