//! Host notification service boundary.
//!
//! # Responsibility
//! - Describe reminder requests in platform-neutral terms.
//! - Define the trait a platform notification service adapter implements.
//!
//! # Invariants
//! - Request identifiers equal the owning record id, so at most one pending
//!   request exists per record.
//! - Completion handlers are informational; callers never block on them.

use crate::model::todo::TodoId;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Completion callback for `NotificationCenter::add`.
pub type CompletionHandler = Box<dyn FnOnce(Result<(), NotificationError>) + Send + 'static>;

/// Completion callback for `NotificationCenter::request_authorization`.
///
/// `Ok(true)` means the user granted the requested options.
pub type AuthorizationHandler = Box<dyn FnOnce(Result<bool, NotificationError>) + Send + 'static>;

/// Errors reported by a notification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// The user denied notification permission.
    Unauthorized,
    /// The service refused the request.
    Rejected(String),
}

impl Display for NotificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "notification permission not granted"),
            Self::Rejected(reason) => write!(f, "notification request rejected: {reason}"),
        }
    }
}

impl Error for NotificationError {}

/// Presentation capabilities requested from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationOptions {
    pub alert: bool,
    pub sound: bool,
    pub badge: bool,
}

impl AuthorizationOptions {
    /// Alert, sound and badge.
    pub const fn all() -> Self {
        Self {
            alert: true,
            sound: true,
            badge: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSound {
    Default,
    Silent,
}

/// User-visible part of a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub sound: NotificationSound,
    /// App badge value applied on delivery; `None` leaves the badge as is.
    pub badge: Option<u32>,
}

/// One-shot trigger matching a calendar time at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarTrigger {
    pub fire_at: DateTime<Utc>,
    pub repeats: bool,
}

impl CalendarTrigger {
    /// Fires once at `due`, with seconds and sub-seconds dropped.
    pub fn once_at(due: DateTime<Utc>) -> Self {
        let fire_at = due.duration_trunc(TimeDelta::minutes(1)).unwrap_or(due);
        Self {
            fire_at,
            repeats: false,
        }
    }
}

/// Pending reminder registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub identifier: TodoId,
    pub content: NotificationContent,
    pub trigger: CalendarTrigger,
}

/// Message delivered from the notification service to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    /// The user acted on a delivered reminder.
    Opened { identifier: TodoId },
}

impl NotificationEvent {
    pub fn opened(identifier: impl Into<TodoId>) -> Self {
        Self::Opened {
            identifier: identifier.into(),
        }
    }
}

/// Adapter over the host OS notification service.
pub trait NotificationCenter {
    fn request_authorization(&self, options: AuthorizationOptions, on_complete: AuthorizationHandler);

    /// Registers a request; an existing pending request with the same
    /// identifier is replaced.
    fn add(&self, request: ReminderRequest, on_complete: CompletionHandler);

    /// Revokes pending requests; unknown identifiers are ignored.
    fn remove_pending(&self, identifiers: &[TodoId]);

    fn set_badge_count(&self, count: u32);
}

impl<C: NotificationCenter + ?Sized> NotificationCenter for Arc<C> {
    fn request_authorization(&self, options: AuthorizationOptions, on_complete: AuthorizationHandler) {
        (**self).request_authorization(options, on_complete)
    }

    fn add(&self, request: ReminderRequest, on_complete: CompletionHandler) {
        (**self).add(request, on_complete)
    }

    fn remove_pending(&self, identifiers: &[TodoId]) {
        (**self).remove_pending(identifiers)
    }

    fn set_badge_count(&self, count: u32) {
        (**self).set_badge_count(count)
    }
}
