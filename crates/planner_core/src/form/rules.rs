//! Field predicates shared by every entry form.

use crate::model::clock::ClockTime;
use crate::model::priority::Priority;
use crate::model::project::TaskData;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Input field a form can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Subject,
    Date,
    Time,
    Priority,
    Tasks,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Subject => "subject",
            Self::Date => "date",
            Self::Time => "time",
            Self::Priority => "priority",
            Self::Tasks => "tasks",
        }
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw field values edited by a form.
///
/// Text fields are stored trimmed. Fields outside a kind's rule table are
/// ignored when that kind builds its record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    pub name: String,
    pub subject: String,
    pub date: Option<NaiveDate>,
    pub clock: Option<ClockTime>,
    pub priority: Option<Priority>,
    pub tasks: Vec<TaskData>,
    /// Carried through task edits so re-saving keeps the completion flag.
    pub is_completed: bool,
}

/// One field-to-predicate mapping.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: FormField,
    pub check: fn(&FormDraft) -> bool,
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl FieldRule {
    pub const fn new(field: FormField, check: fn(&FormDraft) -> bool) -> Self {
        Self { field, check }
    }

    pub fn passes(&self, draft: &FormDraft) -> bool {
        (self.check)(draft)
    }
}

pub fn name_present(draft: &FormDraft) -> bool {
    !draft.name.trim().is_empty()
}

pub fn subject_present(draft: &FormDraft) -> bool {
    !draft.subject.trim().is_empty()
}

pub fn date_chosen(draft: &FormDraft) -> bool {
    draft.date.is_some()
}

pub fn time_chosen(draft: &FormDraft) -> bool {
    draft.clock.is_some()
}

pub fn priority_chosen(draft: &FormDraft) -> bool {
    draft.priority.is_some()
}

pub fn has_tasks(draft: &FormDraft) -> bool {
    !draft.tasks.is_empty()
}

/// Fields whose rule fails, in rule-table order.
pub fn failing_fields(rules: &[FieldRule], draft: &FormDraft) -> Vec<FormField> {
    rules
        .iter()
        .filter(|rule| !rule.passes(draft))
        .map(|rule| rule.field)
        .collect()
}
