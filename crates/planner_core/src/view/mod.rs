//! Toolkit-independent view models for day lists and the week calendar.
//!
//! # Responsibility
//! - Decide section visibility for a category filter.
//! - Bind list data to reusable item slots.
//! - Produce week-strip cells and display labels.
//!
//! # Invariants
//! - View models never mutate store data.

pub mod calendar;
pub mod filter;
pub mod labels;
pub mod pool;
