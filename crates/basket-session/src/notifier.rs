//! # Notifier
//!
//! Short-lived user-facing messages with timed removal.
//!
//! ## Message Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  post("Widget added", Success)                                         │
//! │       │                                                                 │
//! │       ├──► queue.push(notification)                                    │
//! │       ├──► surface.show(notification)                                  │
//! │       └──► spawn: sleep(ttl) ──► dismiss(id)                           │
//! │                                      │                                  │
//! │                                      ├── still queued? remove + hide   │
//! │                                      └── already gone? no-op           │
//! │                                                                         │
//! │  dismiss(id) may also be called by the user at any time; it is safe    │
//! │  to call any number of times.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use basket_core::Severity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::runtime::Handle;
use tracing::debug;
use uuid::Uuid;

// =============================================================================
// Notification
// =============================================================================

/// Identifier of a posted notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    fn new() -> Self {
        NotificationId(Uuid::new_v4())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub text: String,
    pub severity: Severity,
    pub posted_at: DateTime<Utc>,
}

// =============================================================================
// Display Surface
// =============================================================================

/// Where notifications are shown. The surface only draws; the notifier
/// decides when a message goes away.
pub trait NotificationSurface: Send + Sync {
    fn show(&self, notification: &Notification);

    fn hide(&self, id: NotificationId);
}

/// Surface that draws nothing.
pub struct NoOpSurface;

impl NotificationSurface for NoOpSurface {
    fn show(&self, _notification: &Notification) {}
    fn hide(&self, _id: NotificationId) {}
}

// =============================================================================
// Notifier
// =============================================================================

/// Ordered queue of visible notifications.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
    runtime: Handle,
}

struct NotifierInner {
    queue: Mutex<Vec<Notification>>,
    surface: Arc<dyn NotificationSurface>,
    ttl: Duration,
}

impl NotifierInner {
    fn queue(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dismiss(&self, id: NotificationId) -> bool {
        let removed = {
            let mut queue = self.queue();
            let before = queue.len();
            queue.retain(|n| n.id != id);
            queue.len() != before
        };

        if removed {
            self.surface.hide(id);
            debug!(%id, "Notification dismissed");
        }
        removed
    }
}

impl Notifier {
    /// Creates a notifier whose timers run on `runtime`.
    pub fn new(ttl: Duration, surface: Arc<dyn NotificationSurface>, runtime: Handle) -> Self {
        Notifier {
            inner: Arc::new(NotifierInner {
                queue: Mutex::new(Vec::new()),
                surface,
                ttl,
            }),
            runtime,
        }
    }

    /// Shows a message and schedules its removal after the configured ttl.
    pub fn post(&self, text: impl Into<String>, severity: Severity) -> NotificationId {
        let notification = Notification {
            id: NotificationId::new(),
            text: text.into(),
            severity,
            posted_at: Utc::now(),
        };
        let id = notification.id;

        debug!(%id, %severity, text = %notification.text, "Notification posted");
        self.inner.queue().push(notification.clone());
        self.inner.surface.show(&notification);

        let inner = Arc::clone(&self.inner);
        let ttl = self.inner.ttl;
        self.runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            inner.dismiss(id);
        });

        id
    }

    /// Removes a message. Returns false if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.inner.dismiss(id)
    }

    /// Visible messages, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.inner.queue().clone()
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
