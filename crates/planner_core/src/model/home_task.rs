//! Home task record.

use crate::model::entry::{EntryId, EntryKind, Scheduled};
use crate::model::priority::Priority;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A standalone dated assignment tied to a school subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HomeTask {
    pub id: EntryId,
    pub name: String,
    pub subject_name: String,
    pub date_time: NaiveDateTime,
    pub priority: Priority,
    /// Row expansion state; persisted but never consulted by the store.
    #[serde(default)]
    pub is_expanded: bool,
}

impl HomeTask {
    pub fn new(
        name: impl Into<String>,
        subject_name: impl Into<String>,
        date_time: NaiveDateTime,
        priority: Priority,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, subject_name, date_time, priority)
    }

    pub fn with_id(
        id: EntryId,
        name: impl Into<String>,
        subject_name: impl Into<String>,
        date_time: NaiveDateTime,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            subject_name: subject_name.into(),
            date_time,
            priority,
            is_expanded: false,
        }
    }
}

impl Scheduled for HomeTask {
    const KIND: EntryKind = EntryKind::HomeTask;

    fn entry_id(&self) -> EntryId {
        self.id
    }

    fn scheduled_date(&self) -> NaiveDate {
        self.date_time.date()
    }
}
