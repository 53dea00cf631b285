//! Todo use-case service.
//!
//! # Responsibility
//! - Provide the CRUD entry points the UI layer calls.
//! - Keep reminders in step with stored records.
//! - Act as the dispatch point for notification responses.
//!
//! # Invariants
//! - Reminders are synced or cancelled only after the store write succeeds.
//! - Reminder failures never fail a save or remove.

use crate::model::todo::{Todo, TodoRow};
use crate::notify::center::{NotificationCenter, NotificationEvent};
use crate::notify::scheduler::ReminderScheduler;
use crate::store::todo_store::{SaveOutcome, StoreResult, TodoStore};
use log::{debug, info};

/// Session-scoped owner of the record store and reminder scheduler.
pub struct TodoService<C: NotificationCenter> {
    store: TodoStore,
    scheduler: ReminderScheduler<C>,
}

impl<C: NotificationCenter> TodoService<C> {
    pub fn new(store: TodoStore, center: C) -> Self {
        Self {
            store,
            scheduler: ReminderScheduler::new(center),
        }
    }

    /// Startup hook: requests notification permission once.
    pub fn bootstrap(&self) {
        self.scheduler.request_authorization();
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn scheduler(&self) -> &ReminderScheduler<C> {
        &self.scheduler
    }

    pub fn todos(&self) -> &[Todo] {
        self.store.todos()
    }

    pub fn rows(&self) -> Vec<TodoRow> {
        self.store.rows()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.store.get(id)
    }

    /// Upserts a record and re-syncs its reminder.
    ///
    /// Store errors are returned unchanged; the reminder is left untouched
    /// when the write fails.
    pub fn save(&mut self, todo: Todo) -> StoreResult<SaveOutcome> {
        let id = todo.id.clone();
        let outcome = self.store.save(todo)?;
        if let Some(saved) = self.store.get(&id) {
            self.scheduler.sync(saved);
        }
        Ok(outcome)
    }

    /// Removes a record and cancels its reminder.
    pub fn remove(&mut self, id: &str) -> StoreResult<Todo> {
        let removed = self.store.remove(id)?;
        self.scheduler.cancel(id);
        Ok(removed)
    }

    /// Resolves a notification event to the record the UI should show.
    ///
    /// Returns `None` when the record was removed after its reminder was
    /// scheduled.
    pub fn dispatch(&self, event: NotificationEvent) -> Option<&Todo> {
        match event {
            NotificationEvent::Opened { identifier } => {
                let Some(todo) = self.store.get(&identifier) else {
                    debug!(
                        "event=notification_response module=service status=ignored id={identifier}"
                    );
                    return None;
                };
                self.scheduler.clear_badge();
                info!("event=notification_response module=service status=ok id={identifier}");
                Some(todo)
            }
        }
    }
}
