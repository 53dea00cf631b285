//! Core domain logic for the Todos app.
//! This crate owns the record store and reminder scheduling; UI layers call
//! into `TodoService` and never touch the JSON file or notification service
//! directly.

pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;

pub use config::{ConfigError, TodosConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::todo::{format_due, format_due_in, Todo, TodoId, TodoRow, TodoValidationError};
pub use notify::center::{
    AuthorizationOptions, CalendarTrigger, NotificationCenter, NotificationContent,
    NotificationError, NotificationEvent, NotificationSound, ReminderRequest,
};
pub use notify::memory::InMemoryNotificationCenter;
pub use notify::scheduler::{reminder_request, ReminderScheduler, REMINDER_TITLE};
pub use service::todo_service::TodoService;
pub use store::todo_store::{SaveOutcome, StoreError, StoreResult, TodoStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
