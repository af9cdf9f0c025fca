//! Create/edit form validation.
//!
//! # Responsibility
//! - Share one validity state machine across project, task, lesson and home
//!   task forms, parameterized by a field-to-predicate rule table.
//! - Compose stored date-times from a date plus a 12-hour clock.
//!
//! # Invariants
//! - Save is enabled iff every rule of the form's kind passes.
//! - Time composition and edit prefill use the same 12h/24h rule.

pub mod entry_form;
pub mod kinds;
pub mod rules;
