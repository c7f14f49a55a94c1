use std::collections::HashMap;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use staffsync_ui::notifications::{
    EXIT_DURATION, NotificationCenter, NotificationEvent, NotificationId, Phase, Severity, placements,
};

#[derive(Debug, Clone)]
enum Action {
    Show { duration_ms: u64 },
    Dismiss { nth: usize },
    Advance { ms: u64 },
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u64..2000).prop_map(|duration_ms| Action::Show { duration_ms }),
        (0usize..8).prop_map(|nth| Action::Dismiss { nth }),
        (0u64..500).prop_map(|ms| Action::Advance { ms }),
    ]
}

#[test]
fn test_show_success_for_100ms() {
    let t0 = Instant::now();
    let mut center = NotificationCenter::new();
    let id = center
        .show_at("x", Severity::Success, Duration::from_millis(100), t0)
        .unwrap();

    let mut phases = Vec::new();
    for step in 0..=50 {
        let now = t0 + Duration::from_millis(step * 10);
        phases.extend(
            center
                .tick(now)
                .into_iter()
                .filter(|e| e.id == id)
                .map(|e| e.phase),
        );
    }

    assert_eq!(phases, [Phase::Visible, Phase::Dismissing, Phase::Removed]);
}

#[test]
fn test_second_show_does_not_cancel_first() {
    let t0 = Instant::now();
    let mut center = NotificationCenter::new();
    let first = center
        .show_at("first", Severity::Info, Duration::from_millis(1000), t0)
        .unwrap();
    let second = center
        .show_at("second", Severity::Error, Duration::from_millis(1000), t0)
        .unwrap();
    assert_ne!(first, second);

    center.tick(t0 + Duration::from_millis(500));
    assert_eq!(center.get(first).unwrap().phase(), Phase::Visible);
    assert_eq!(center.get(second).unwrap().phase(), Phase::Visible);
    assert_eq!(placements(&center, t0 + Duration::from_secs(1), 80, 24).len(), 2);
}

fn record(events: Vec<NotificationEvent>, removed: &mut HashMap<NotificationId, usize>) {
    for event in events {
        if event.phase == Phase::Removed {
            *removed.entry(event.id).or_default() += 1;
        }
    }
}

proptest! {
    /// Whatever interleaving of shows, dismissals and time passing happens,
    /// every notification is removed exactly once.
    #[test]
    fn prop_every_notification_removed_once(actions in prop::collection::vec(action(), 0..40)) {
        let t0 = Instant::now();
        let mut now = t0;
        let mut center = NotificationCenter::new();
        let mut shown: Vec<NotificationId> = Vec::new();
        let mut removed: HashMap<NotificationId, usize> = HashMap::new();

        for action in actions {
            match action {
                Action::Show { duration_ms } => {
                    let id = center
                        .show_at("msg", Severity::Info, Duration::from_millis(duration_ms), now)
                        .unwrap();
                    shown.push(id);
                }
                Action::Dismiss { nth } => {
                    if let Some(id) = shown.get(nth) {
                        center.dismiss_at(*id, now);
                        center.dismiss_at(*id, now);
                    }
                }
                Action::Advance { ms } => {
                    now += Duration::from_millis(ms);
                    record(center.tick(now), &mut removed);
                }
            }
        }

        now += Duration::from_millis(2000) + EXIT_DURATION;
        record(center.tick(now), &mut removed);
        record(center.tick(now + Duration::from_secs(1)), &mut removed);

        prop_assert!(center.is_empty());
        prop_assert_eq!(center.next_deadline(), None);
        for id in shown {
            prop_assert_eq!(removed.get(&id).copied(), Some(1));
        }
    }
}
