//! Record persistence.
//!
//! # Responsibility
//! - Own the in-memory to-do collection for one application session.
//! - Keep the JSON file on disk equal to the in-memory collection.
//!
//! # Invariants
//! - Write paths call `Todo::validate()` before mutating anything.
//! - Store APIs return semantic errors (`NotFound`) in addition to I/O errors.

pub mod todo_store;
