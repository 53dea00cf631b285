//! Reminder scheduling for to-do records.
//!
//! # Responsibility
//! - Keep exactly one pending reminder per record with `should_notify`.
//! - Translate records into platform-neutral reminder requests.
//!
//! # Invariants
//! - `sync` always cancels before it schedules, so an edited due date or a
//!   disabled flag never leaves a stale reminder behind.
//! - Service failures are logged and never surfaced to callers.

use crate::model::todo::Todo;
use crate::notify::center::{
    AuthorizationOptions, CalendarTrigger, NotificationCenter, NotificationContent,
    NotificationError, NotificationSound, ReminderRequest,
};
use log::{debug, error, info, warn};

/// Title shown on every reminder; the record title goes in the body.
pub const REMINDER_TITLE: &str = "Todo reminder";

/// Badge value applied when a reminder is delivered.
pub const REMINDER_BADGE: u32 = 1;

/// Builds the reminder request for one record.
pub fn reminder_request(todo: &Todo) -> ReminderRequest {
    ReminderRequest {
        identifier: todo.id.clone(),
        content: NotificationContent {
            title: REMINDER_TITLE.to_string(),
            body: todo.title.clone(),
            sound: NotificationSound::Default,
            badge: Some(REMINDER_BADGE),
        },
        trigger: CalendarTrigger::once_at(todo.due),
    }
}

/// Keeps host reminders consistent with stored records.
pub struct ReminderScheduler<C: NotificationCenter> {
    center: C,
}

impl<C: NotificationCenter> ReminderScheduler<C> {
    pub fn new(center: C) -> Self {
        Self { center }
    }

    pub fn center(&self) -> &C {
        &self.center
    }

    /// Asks the user for alert, sound and badge permission.
    ///
    /// The outcome is only logged.
    pub fn request_authorization(&self) {
        self.center.request_authorization(
            AuthorizationOptions::all(),
            Box::new(|result: Result<bool, NotificationError>| match result {
                Ok(granted) => info!(
                    "event=notification_auth module=notify status=ok granted={granted}"
                ),
                Err(err) => warn!("event=notification_auth module=notify status=error error={err}"),
            }),
        );
    }

    /// Replaces any pending reminder for `todo` with one matching its
    /// current state.
    pub fn sync(&self, todo: &Todo) {
        self.center.remove_pending(std::slice::from_ref(&todo.id));

        if !todo.should_notify {
            info!(
                "event=reminder_sync module=notify status=ok id={} scheduled=false",
                todo.id
            );
            return;
        }

        let request = reminder_request(todo);
        let fire_at = request.trigger.fire_at;
        let id = todo.id.clone();
        self.center.add(
            request,
            Box::new(move |result: Result<(), NotificationError>| match result {
                Ok(()) => debug!("event=reminder_add module=notify status=ok id={id}"),
                Err(err) => error!("event=reminder_add module=notify status=error id={id} error={err}"),
            }),
        );
        info!(
            "event=reminder_sync module=notify status=ok id={} scheduled=true fire_at={}",
            todo.id,
            fire_at.to_rfc3339()
        );
    }

    /// Revokes the pending reminder for `id`, if any.
    pub fn cancel(&self, id: &str) {
        self.center.remove_pending(&[id.to_string()]);
        info!("event=reminder_cancel module=notify status=ok id={id}");
    }

    pub fn clear_badge(&self) {
        self.center.set_badge_count(0);
    }
}
