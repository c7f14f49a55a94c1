//! Notification geometry in the top-right corner.

use std::time::{Duration, Instant};

use crate::transitions::{Easing, TransitionConfig};

use super::center::NotificationCenter;
use super::notification::{EXIT_DURATION, NotificationId, Phase};

pub const TOAST_WIDTH: u16 = 44;
pub const TOAST_HEIGHT: u16 = 1;
pub const TOAST_MARGIN: u16 = 1;
/// Distance from the top edge.
pub const TOP_OFFSET: u16 = 1;
/// At most this many notifications are stacked on screen.
pub const MAX_VISIBLE: usize = 5;

const SLIDE_IN: TransitionConfig = TransitionConfig {
    duration: Duration::from_millis(300),
    easing: Easing::EaseOutCubic,
};

const SLIDE_OUT: TransitionConfig = TransitionConfig {
    duration: EXIT_DURATION,
    easing: Easing::EaseInCubic,
};

/// Where a notification is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub id: NotificationId,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Lay out live notifications, newest on top, sliding in from the right.
///
/// Mounting notifications sit fully off-screen and are skipped, as are
/// notifications that would land below `viewport_height`.
pub fn placements(
    center: &NotificationCenter,
    now: Instant,
    viewport_width: u16,
    viewport_height: u16,
) -> Vec<Placement> {
    let travel = TOAST_WIDTH as f32 + 2.0;
    let base_x = viewport_width.saturating_sub(TOAST_WIDTH + 1);

    center
        .active()
        .take(MAX_VISIBLE)
        .enumerate()
        .filter_map(|(i, notification)| {
            let slide_in = match notification.visible_at() {
                Some(at) => SLIDE_IN.progress(now.saturating_duration_since(at)),
                None if notification.phase() == Phase::Mounting => 0.0,
                // Dismissed before it ever became visible.
                None => 1.0,
            };
            let slide_out = match notification.dismissed_at() {
                Some(at) => SLIDE_OUT.progress(now.saturating_duration_since(at)),
                None => 0.0,
            };

            let offset = ((1.0 - slide_in) * travel) as u16 + (slide_out * travel) as u16;
            let x = base_x.saturating_add(offset).min(viewport_width);
            let width = viewport_width.saturating_sub(x).min(TOAST_WIDTH);
            let y = TOP_OFFSET + (i as u16) * (TOAST_HEIGHT + TOAST_MARGIN);

            if width == 0 || y >= viewport_height {
                return None;
            }
            Some(Placement {
                id: notification.id(),
                x,
                y,
                width,
                height: TOAST_HEIGHT,
            })
        })
        .collect()
}

/// Whether any notification is mid-transition and needs redrawing.
pub fn is_animating(center: &NotificationCenter, now: Instant) -> bool {
    center.active().any(|n| match n.phase() {
        Phase::Created | Phase::Mounting | Phase::Dismissing => true,
        Phase::Visible => n
            .visible_at()
            .is_some_and(|at| now.saturating_duration_since(at) < SLIDE_IN.duration),
        Phase::Removed => false,
    })
}
