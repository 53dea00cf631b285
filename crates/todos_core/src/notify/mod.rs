//! Local reminder notifications.
//!
//! # Responsibility
//! - Abstract the host notification service behind `NotificationCenter`.
//! - Derive one reminder per record from its due date and title.
//!
//! # Invariants
//! - Reminders are keyed by record id.
//! - Notification failures never fail the record operation that caused them.

pub mod center;
pub mod memory;
pub mod scheduler;
