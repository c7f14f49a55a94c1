use std::time::{Duration, Instant};

/// Default time a notification stays up before dismissing itself.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

/// Delay between mounting a notification and it becoming visible.
pub const ENTER_DELAY: Duration = Duration::from_millis(100);

/// Length of the exit transition before the notification is removed.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub(super) u64);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

/// Classification of a notification. Only affects its visual treatment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Map a server-provided type string; unknown types are informational.
    pub fn from_kind(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "error" | "danger" => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Info => "●",
            Severity::Success => "✓",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }
}

/// Lifecycle of a notification.
///
/// `Created -> Mounting -> Visible -> Dismissing -> Removed`. A notification
/// dismissed while still mounting skips `Visible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Mounting,
    Visible,
    Dismissing,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TimerAction {
    Enter,
    AutoDismiss,
    Remove,
}

/// A scheduled transition. Replacing or clearing it cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Timer {
    pub deadline: Instant,
    pub action: TimerAction,
}

/// A phase change reported by the notification center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationEvent {
    pub id: NotificationId,
    pub phase: Phase,
}

/// A transient status message.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    message: String,
    severity: Severity,
    created_at: Instant,
    duration: Duration,
    phase: Phase,
    visible_at: Option<Instant>,
    dismissed_at: Option<Instant>,
    enter_timer: Option<Timer>,
    dismiss_timer: Option<Timer>,
}

impl Notification {
    pub(super) fn new(
        id: NotificationId,
        message: String,
        severity: Severity,
        duration: Duration,
        now: Instant,
    ) -> Self {
        Self {
            id,
            message,
            severity,
            created_at: now,
            duration,
            phase: Phase::Created,
            visible_at: None,
            dismissed_at: None,
            enter_timer: None,
            dismiss_timer: None,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn visible_at(&self) -> Option<Instant> {
        self.visible_at
    }

    pub fn dismissed_at(&self) -> Option<Instant> {
        self.dismissed_at
    }

    /// Single-line rendering, truncated to `max_width` characters.
    pub fn line(&self, max_width: usize) -> String {
        let text = format!("{} {}", self.severity.icon(), self.message);
        if text.chars().count() <= max_width {
            return text;
        }
        let keep = max_width.saturating_sub(3);
        let mut truncated: String = text.chars().take(keep).collect();
        truncated.push_str("...");
        truncated
    }

    /// Place into the overlay and schedule entrance and auto-dismissal.
    pub(super) fn mount(&mut self) {
        self.phase = Phase::Mounting;
        self.enter_timer = Some(Timer {
            deadline: self.created_at + ENTER_DELAY,
            action: TimerAction::Enter,
        });
        self.dismiss_timer = Some(Timer {
            deadline: self.created_at + self.duration,
            action: TimerAction::AutoDismiss,
        });
    }

    /// Start the exit transition at `at`.
    ///
    /// Cancels any pending entrance or auto-dismiss timer. Returns `false` if
    /// the notification is already leaving.
    pub(super) fn begin_dismiss(&mut self, at: Instant) -> bool {
        if matches!(self.phase, Phase::Dismissing | Phase::Removed) {
            return false;
        }
        self.phase = Phase::Dismissing;
        self.dismissed_at = Some(at);
        self.enter_timer = None;
        self.dismiss_timer = Some(Timer {
            deadline: at + EXIT_DURATION,
            action: TimerAction::Remove,
        });
        true
    }

    pub(super) fn next_deadline(&self) -> Option<Instant> {
        self.next_timer().map(|t| t.deadline)
    }

    fn next_timer(&self) -> Option<Timer> {
        [self.enter_timer, self.dismiss_timer]
            .into_iter()
            .flatten()
            .min_by_key(|t| t.deadline)
    }

    /// Fire every timer due at `now`, in deadline order.
    pub(super) fn advance(&mut self, now: Instant, events: &mut Vec<NotificationEvent>) {
        while let Some(timer) = self.next_timer().filter(|t| t.deadline <= now) {
            match timer.action {
                TimerAction::Enter => {
                    self.enter_timer = None;
                    self.phase = Phase::Visible;
                    self.visible_at = Some(timer.deadline);
                }
                TimerAction::AutoDismiss => {
                    self.begin_dismiss(timer.deadline);
                }
                TimerAction::Remove => {
                    self.dismiss_timer = None;
                    self.phase = Phase::Removed;
                }
            }
            events.push(NotificationEvent {
                id: self.id,
                phase: self.phase,
            });
        }
    }
}
