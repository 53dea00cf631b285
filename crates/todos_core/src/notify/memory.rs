//! In-process notification service.
//!
//! Keeps pending requests in memory and delivers them when asked. Used by
//! the smoke CLI and tests in place of the OS notification service.

use crate::model::todo::TodoId;
use crate::notify::center::{
    AuthorizationHandler, AuthorizationOptions, CompletionHandler, NotificationCenter,
    NotificationError, ReminderRequest,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct CenterState {
    authorization: Option<bool>,
    deny_authorization: bool,
    fail_next_add: Option<String>,
    pending: BTreeMap<TodoId, ReminderRequest>,
    delivered: Vec<ReminderRequest>,
    badge: u32,
}

/// Notification service backed by an in-memory pending map.
#[derive(Debug, Default)]
pub struct InMemoryNotificationCenter {
    state: Mutex<CenterState>,
}

impl InMemoryNotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next authorization prompt come back denied.
    pub fn deny_authorization(&self) {
        self.lock().deny_authorization = true;
    }

    /// Makes the next `add` call fail with `reason`.
    pub fn fail_next_add(&self, reason: impl Into<String>) {
        self.lock().fail_next_add = Some(reason.into());
    }

    /// `None` until authorization has been requested.
    pub fn authorization(&self) -> Option<bool> {
        self.lock().authorization
    }

    pub fn pending(&self, identifier: &str) -> Option<ReminderRequest> {
        self.lock().pending.get(identifier).cloned()
    }

    /// Pending identifiers in sorted order.
    pub fn pending_identifiers(&self) -> Vec<TodoId> {
        self.lock().pending.keys().cloned().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn delivered(&self) -> Vec<ReminderRequest> {
        self.lock().delivered.clone()
    }

    pub fn badge_count(&self) -> u32 {
        self.lock().badge
    }

    /// Delivers every pending request whose trigger time is at or before `now`.
    ///
    /// Delivered requests leave the pending set and apply their badge value.
    pub fn deliver_due(&self, now: DateTime<Utc>) -> Vec<ReminderRequest> {
        let mut state = self.lock();
        let due_ids: Vec<TodoId> = state
            .pending
            .iter()
            .filter(|(_, request)| request.trigger.fire_at <= now)
            .map(|(id, _)| id.clone())
            .collect();

        let mut fired = Vec::with_capacity(due_ids.len());
        for id in due_ids {
            if let Some(request) = state.pending.remove(&id) {
                if let Some(badge) = request.content.badge {
                    state.badge = badge;
                }
                state.delivered.push(request.clone());
                fired.push(request);
            }
        }
        fired
    }

    fn lock(&self) -> MutexGuard<'_, CenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    fn request_authorization(&self, _options: AuthorizationOptions, on_complete: AuthorizationHandler) {
        let granted = {
            let mut state = self.lock();
            let granted = !state.deny_authorization;
            state.authorization = Some(granted);
            granted
        };
        on_complete(Ok(granted));
    }

    fn add(&self, request: ReminderRequest, on_complete: CompletionHandler) {
        let result = {
            let mut state = self.lock();
            if state.authorization == Some(false) {
                Err(NotificationError::Unauthorized)
            } else if let Some(reason) = state.fail_next_add.take() {
                Err(NotificationError::Rejected(reason))
            } else {
                state.pending.insert(request.identifier.clone(), request);
                Ok(())
            }
        };
        on_complete(result);
    }

    fn remove_pending(&self, identifiers: &[TodoId]) {
        let mut state = self.lock();
        for identifier in identifiers {
            state.pending.remove(identifier);
        }
    }

    fn set_badge_count(&self, count: u32) {
        self.lock().badge = count;
    }
}
