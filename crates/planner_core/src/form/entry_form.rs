//! Generic create/edit form driven by a kind's rule table.
//!
//! # Responsibility
//! - Hold draft field values and recompute `save_enabled` after every change.
//! - Prefill from an existing record in edit mode, keeping its identity.
//! - Build the record only when every rule of the kind passes.
//!
//! # Invariants
//! - `save_enabled()` always equals "all of `K::RULES` pass" for the current
//!   draft; no setter leaves it stale.
//! - `build()` in edit mode reuses the edited record's id.

use crate::form::rules::{failing_fields, FieldRule, FormDraft, FormField};
use crate::model::clock::{ClockError, ClockTime};
use crate::model::entry::EntryId;
use crate::model::priority::{Priority, UnknownPriority};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

/// Form build error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Listed rules do not pass; save must stay disabled.
    Incomplete(Vec<FormField>),
    /// Project task referenced by id is not part of the draft.
    UnknownTask(EntryId),
    /// Project task with this id is already in the draft.
    DuplicateTask(EntryId),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incomplete(fields) => {
                let names = fields
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "form is incomplete: {names}")
            }
            Self::UnknownTask(id) => write!(f, "task not in project draft: {id}"),
            Self::DuplicateTask(id) => write!(f, "task already in project draft: {id}"),
        }
    }
}

impl Error for FormError {}

/// Per-record-type form behavior.
pub trait FormKind {
    type Output;

    /// Fields that must all pass before saving is allowed.
    const RULES: &'static [FieldRule];

    /// Builds the record from a draft that passed every rule.
    ///
    /// Returns `None` if a required value is absent, which `RULES` should
    /// already have ruled out.
    fn assemble(draft: &FormDraft, id: Option<EntryId>) -> Option<Self::Output>;

    /// Field values shown when editing `existing`.
    fn prefill(existing: &Self::Output) -> FormDraft;

    fn id_of(existing: &Self::Output) -> EntryId;
}

/// Draft state plus derived save-enabled flag for one record type.
#[derive(Debug, Clone)]
pub struct EntryForm<K: FormKind> {
    draft: FormDraft,
    editing: Option<EntryId>,
    save_enabled: bool,
    _kind: PhantomData<K>,
}

impl<K: FormKind> Default for EntryForm<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FormKind> EntryForm<K> {
    /// Blank create-mode form.
    pub fn new() -> Self {
        let mut form = Self {
            draft: FormDraft::default(),
            editing: None,
            save_enabled: false,
            _kind: PhantomData,
        };
        form.revalidate();
        form
    }

    /// Edit-mode form prefilled from an existing record.
    pub fn for_edit(existing: &K::Output) -> Self {
        let mut form = Self {
            draft: K::prefill(existing),
            editing: Some(K::id_of(existing)),
            save_enabled: false,
            _kind: PhantomData,
        };
        form.revalidate();
        form
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_id(&self) -> Option<EntryId> {
        self.editing
    }

    pub fn save_enabled(&self) -> bool {
        self.save_enabled
    }

    /// Fields currently blocking save, in rule order.
    pub fn missing_fields(&self) -> Vec<FormField> {
        failing_fields(K::RULES, &self.draft)
    }

    pub fn set_name(&mut self, value: &str) {
        self.draft.name = value.trim().to_string();
        self.revalidate();
    }

    pub fn set_subject(&mut self, value: &str) {
        self.draft.subject = value.trim().to_string();
        self.revalidate();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.draft.date = Some(date);
        self.revalidate();
    }

    pub fn clear_date(&mut self) {
        self.draft.date = None;
        self.revalidate();
    }

    pub fn set_clock(&mut self, clock: ClockTime) {
        self.draft.clock = Some(clock);
        self.revalidate();
    }

    /// Applies the picker's raw hour/minute/AM-PM strings.
    ///
    /// An invalid combination clears the time, so save is disabled, and the
    /// parse error is returned for display.
    pub fn set_time_parts(
        &mut self,
        hour: &str,
        minute: &str,
        meridiem: &str,
    ) -> Result<(), ClockError> {
        let parsed = ClockTime::from_parts(hour, minute, meridiem);
        self.apply_clock(parsed)
    }

    /// Applies a combined label such as `2:30 PM`.
    pub fn set_time_label(&mut self, label: &str) -> Result<(), ClockError> {
        let parsed = label.parse::<ClockTime>();
        self.apply_clock(parsed)
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.draft.priority = Some(priority);
        self.revalidate();
    }

    /// Applies a priority button label; unknown labels clear the selection.
    pub fn set_priority_label(&mut self, label: &str) -> Result<(), UnknownPriority> {
        let parsed = label.parse::<Priority>();
        self.draft.priority = parsed.as_ref().ok().copied();
        self.revalidate();
        parsed.map(|_| ())
    }

    /// Clears every field and leaves edit mode.
    pub fn reset(&mut self) {
        self.draft = FormDraft::default();
        self.editing = None;
        self.revalidate();
    }

    /// Builds the record when save is enabled.
    pub fn build(&self) -> Result<K::Output, FormError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::Incomplete(missing));
        }
        K::assemble(&self.draft, self.editing).ok_or_else(|| {
            FormError::Incomplete(K::RULES.iter().map(|rule| rule.field).collect())
        })
    }

    pub(crate) fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }

    pub(crate) fn revalidate(&mut self) {
        self.save_enabled = K::RULES.iter().all(|rule| rule.passes(&self.draft));
    }

    fn apply_clock(&mut self, parsed: Result<ClockTime, ClockError>) -> Result<(), ClockError> {
        self.draft.clock = parsed.as_ref().ok().copied();
        self.revalidate();
        parsed.map(|_| ())
    }
}
