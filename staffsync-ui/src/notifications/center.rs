//! The overlay layer that owns live notifications.

use std::time::{Duration, Instant};

use super::notification::{
    DEFAULT_DURATION, Notification, NotificationEvent, NotificationId, Phase, Severity,
};

/// Queues transient notifications and drives their lifecycle.
///
/// Time is always supplied by the caller, so the whole state machine can be
/// stepped deterministically. Every notification reaches [`Phase::Removed`]
/// exactly once and is dropped right after that event is reported.
#[derive(Debug)]
pub struct NotificationCenter {
    mounted: bool,
    next_id: u64,
    /// Live notifications, oldest first.
    notifications: Vec<Notification>,
    /// Transitions caused outside of `tick` (explicit dismissals).
    pending: Vec<NotificationEvent>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    /// Create a center with its overlay mounted.
    pub fn new() -> Self {
        Self {
            mounted: true,
            next_id: 0,
            notifications: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Create a center without an overlay. Showing is a no-op until
    /// [`mount`](Self::mount) is called.
    pub fn detached() -> Self {
        Self {
            mounted: false,
            ..Self::new()
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Remove the overlay, dropping every live notification.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.notifications.clear();
        self.pending.clear();
    }

    /// Show a message for the default duration.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> Option<NotificationId> {
        self.show_at(message, severity, DEFAULT_DURATION, Instant::now())
    }

    /// Show a message that dismisses itself `duration` after `now`.
    ///
    /// Returns `None` without doing anything when the overlay is not mounted.
    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
        now: Instant,
    ) -> Option<NotificationId> {
        let message = message.into();
        if !self.mounted {
            log::debug!("Overlay not mounted, dropping notification: {}", message);
            return None;
        }

        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let mut notification = Notification::new(id, message, severity, duration, now);
        notification.mount();
        log::info!(
            "Notification {} ({:?}): {}",
            id,
            severity,
            notification.message()
        );
        self.notifications.push(notification);
        Some(id)
    }

    /// Dismiss a notification now.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.dismiss_at(id, Instant::now())
    }

    /// Start the exit transition of a notification at `now`.
    ///
    /// Cancels its pending auto-dismissal. Returns `false` when the
    /// notification is unknown or already leaving.
    pub fn dismiss_at(&mut self, id: NotificationId, now: Instant) -> bool {
        let Some(notification) = self.notifications.iter_mut().find(|n| n.id() == id) else {
            return false;
        };
        if !notification.begin_dismiss(now) {
            log::debug!("{} already dismissing", id);
            return false;
        }
        self.pending.push(NotificationEvent {
            id,
            phase: Phase::Dismissing,
        });
        true
    }

    /// Fire all timers due at `now` and report the resulting transitions.
    pub fn tick(&mut self, now: Instant) -> Vec<NotificationEvent> {
        let mut events = std::mem::take(&mut self.pending);
        for notification in &mut self.notifications {
            notification.advance(now, &mut events);
        }
        self.notifications.retain(|n| n.phase() != Phase::Removed);
        events
    }

    /// Earliest pending timer across all notifications.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.notifications
            .iter()
            .filter_map(Notification::next_deadline)
            .min()
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id() == id)
    }

    /// Live notifications, newest first (stacking order).
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}
