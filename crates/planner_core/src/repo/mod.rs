//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-document persistence contract used by the store.
//! - Isolate JSON encoding and file I/O from store orchestration.
//!
//! # Invariants
//! - Every save rewrites the full document; there are no partial writes.
//! - Repository APIs return semantic errors (`Corrupt`,
//!   `UnsupportedSchemaVersion`) in addition to I/O transport errors.

pub mod document;
pub mod document_repo;
