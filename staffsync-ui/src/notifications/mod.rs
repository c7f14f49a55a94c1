//! Transient status notifications.

mod center;
mod handle;
mod notification;
mod render;

pub use center::NotificationCenter;
pub use handle::NotificationHandle;
pub use notification::{
    DEFAULT_DURATION, ENTER_DELAY, EXIT_DURATION, Notification, NotificationEvent,
    NotificationId, Phase, Severity,
};
pub use render::{MAX_VISIBLE, Placement, TOAST_WIDTH, is_animating, placements};
