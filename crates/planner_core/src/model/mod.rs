//! Planner domain model.
//!
//! # Responsibility
//! - Define the plain records held by the store: projects with tasks,
//!   lessons and home tasks.
//! - Define the value types forms compose them from (clock, priority).
//!
//! # Invariants
//! - Every stored record is identified by a stable `EntryId`.
//! - Records carry no behavior beyond data and derived counters.

pub mod agenda;
pub mod clock;
pub mod entry;
pub mod home_task;
pub mod lesson;
pub mod priority;
pub mod project;
