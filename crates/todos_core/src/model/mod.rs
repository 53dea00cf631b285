//! Domain model for to-do records.
//!
//! # Responsibility
//! - Define the canonical record shape shared by store, scheduler and UI.
//!
//! # Invariants
//! - Every record is identified by a stable, non-blank `TodoId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod todo;
