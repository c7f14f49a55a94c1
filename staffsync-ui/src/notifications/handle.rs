//! Shared access to a notification center from async tasks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use super::center::NotificationCenter;
use super::notification::{DEFAULT_DURATION, NotificationEvent, NotificationId, Severity};

/// Current time on the runtime clock (honors paused time in tests).
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Cloneable handle to a [`NotificationCenter`].
///
/// Handlers call [`show`](Self::show) and [`dismiss`](Self::dismiss); one task
/// runs [`drive`](Self::drive) to fire timers.
#[derive(Debug, Clone)]
pub struct NotificationHandle {
    center: Arc<Mutex<NotificationCenter>>,
    wakeup: Arc<Notify>,
}

impl Default for NotificationHandle {
    fn default() -> Self {
        Self::new(NotificationCenter::new())
    }
}

impl NotificationHandle {
    pub fn new(center: NotificationCenter) -> Self {
        Self {
            center: Arc::new(Mutex::new(center)),
            wakeup: Arc::new(Notify::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NotificationCenter> {
        self.center.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show a message for the default duration.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> Option<NotificationId> {
        self.show_for(message, severity, DEFAULT_DURATION)
    }

    pub fn show_for(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) -> Option<NotificationId> {
        let id = self.lock().show_at(message, severity, duration, now());
        log::debug!("NotificationHandle: sending wakeup (show)");
        self.wakeup.notify_one();
        id
    }

    pub fn dismiss(&self, id: NotificationId) -> bool {
        let dismissed = self.lock().dismiss_at(id, now());
        if dismissed {
            self.wakeup.notify_one();
        }
        dismissed
    }

    /// Run `f` with the center locked.
    pub fn with<R>(&self, f: impl FnOnce(&NotificationCenter) -> R) -> R {
        f(&self.lock())
    }

    /// Fire timers until `cancel` triggers.
    ///
    /// Sleeps until the earliest pending deadline or until a notification is
    /// shown or dismissed, then reports each transition to `on_event`.
    pub async fn drive<F>(&self, cancel: CancellationToken, mut on_event: F)
    where
        F: FnMut(NotificationEvent, &NotificationCenter),
    {
        loop {
            let deadline = self.lock().next_deadline();
            let sleep = async {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at.into()).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.wakeup.notified() => {}
                _ = sleep => {}
            }

            let mut center = self.lock();
            for event in center.tick(now()) {
                on_event(event, &center);
            }
        }
        log::debug!("Notification driver stopped");
    }
}
