//! Background notification polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::actions::Actions;

/// Poll the server every `interval` until `cancel` triggers.
///
/// The first poll happens immediately.
pub async fn run(actions: Arc<Actions>, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let count = actions.poll_notifications().await;
                if count > 0 {
                    log::debug!("Poller: {} new notification(s)", count);
                }
            }
        }
    }
    log::debug!("Poller stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use staffsync_lib::api::{
        AttendanceResponse, NotificationsResponse, PayrollRequest, ServerNotification, StaffApi,
        SuccessResponse,
    };
    use staffsync_lib::error::{ApiError, Error};
    use staffsync_ui::notifications::NotificationHandle;

    use super::*;

    #[derive(Default)]
    struct CountingApi {
        polls: AtomicUsize,
    }

    #[async_trait]
    impl StaffApi for CountingApi {
        async fn mark_attendance(&self) -> Result<AttendanceResponse, Error> {
            Err(ApiError::http(404, "unused").into())
        }

        async fn notifications(&self) -> Result<NotificationsResponse, Error> {
            let n = self.polls.fetch_add(1, Ordering::SeqCst);
            if n % 2 == 1 {
                return Err(ApiError::http(503, "busy").into());
            }
            Ok(NotificationsResponse {
                notifications: vec![ServerNotification {
                    message: format!("poll {}", n),
                    kind: "info".to_string(),
                }],
            })
        }

        async fn delete_employee(&self, _employee_id: i64) -> Result<SuccessResponse, Error> {
            Err(ApiError::http(404, "unused").into())
        }

        async fn generate_payroll(&self, _request: &PayrollRequest) -> Result<SuccessResponse, Error> {
            Err(ApiError::http(404, "unused").into())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_interval_until_cancelled() {
        let api = Arc::new(CountingApi::default());
        let handle = NotificationHandle::default();
        let actions = Arc::new(Actions::new(
            api.clone(),
            handle.clone(),
            Duration::from_secs(3600),
        ));
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run(actions, Duration::from_secs(30), cancel.clone()));

        // Ticks at 0s, 30s and 60s.
        tokio::time::sleep(Duration::from_secs(75)).await;
        cancel.cancel();
        task.await.unwrap();

        assert_eq!(api.polls.load(Ordering::SeqCst), 3);
        // The failed poll in the middle shows nothing.
        assert_eq!(handle.with(|c| c.len()), 2);
    }
}
