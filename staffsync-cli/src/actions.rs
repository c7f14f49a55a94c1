//! User actions: call the server, then report the outcome as notifications.
//!
//! Transport failures show a generic message and are logged. Responses with
//! `success: false` show the server's message when it sent one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{error, info, warn};
use staffsync_lib::api::{PayrollRequest, StaffApi};
use staffsync_ui::notifications::{NotificationHandle, Severity};

const ATTENDANCE_FAILED: &str = "Error marking attendance. Please try again.";
const DELETE_FAILED: &str = "Error deleting employee";
const PAYROLL_FAILED: &str = "Error generating payroll";

pub struct Actions {
    api: Arc<dyn StaffApi>,
    notifications: NotificationHandle,
    toast_duration: Duration,
    /// Set while an attendance request is in flight (the button is disabled).
    attendance_busy: AtomicBool,
}

impl Actions {
    pub fn new(
        api: Arc<dyn StaffApi>,
        notifications: NotificationHandle,
        toast_duration: Duration,
    ) -> Self {
        Self {
            api,
            notifications,
            toast_duration,
            attendance_busy: AtomicBool::new(false),
        }
    }

    fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.notifications
            .show_for(message, severity, self.toast_duration);
    }

    /// Message from the server, or `fallback` when it sent none.
    fn server_message(message: Option<&str>, fallback: &str) -> String {
        match message.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn attendance_busy(&self) -> bool {
        self.attendance_busy.load(Ordering::SeqCst)
    }

    /// Mark attendance. Returns the new status line on success.
    ///
    /// Ignored while a previous mark is still in flight.
    pub async fn mark_attendance(&self) -> Option<String> {
        if self.attendance_busy.swap(true, Ordering::SeqCst) {
            warn!("Attendance request already in flight");
            return None;
        }

        let result = self.api.mark_attendance().await;
        self.attendance_busy.store(false, Ordering::SeqCst);

        match result {
            Ok(response) if response.success => {
                info!("Attendance marked: {:?} at {:?}", response.kind, response.time);
                self.notify(
                    Self::server_message(Some(&response.message), "Attendance marked"),
                    Severity::Success,
                );
                response.status_line()
            }
            Ok(response) => {
                self.notify(
                    Self::server_message(Some(&response.message), ATTENDANCE_FAILED),
                    Severity::Error,
                );
                None
            }
            Err(e) => {
                error!("Attendance error: {}", e);
                self.notify(ATTENDANCE_FAILED, Severity::Error);
                None
            }
        }
    }

    /// Fetch server notifications and show each one. Returns how many.
    ///
    /// Failures are only logged; polling runs in the background.
    pub async fn poll_notifications(&self) -> usize {
        match self.api.notifications().await {
            Ok(response) => {
                for notification in &response.notifications {
                    self.notify(
                        notification.message.clone(),
                        Severity::from_kind(&notification.kind),
                    );
                }
                response.notifications.len()
            }
            Err(e) => {
                warn!("Error checking notifications: {}", e);
                0
            }
        }
    }

    pub async fn delete_employee(&self, employee_id: i64) -> bool {
        match self.api.delete_employee(employee_id).await {
            Ok(response) if response.success => {
                info!("Deleted employee {}", employee_id);
                self.notify("Employee deleted successfully", Severity::Success);
                true
            }
            Ok(response) => {
                self.notify(
                    Self::server_message(response.message.as_deref(), DELETE_FAILED),
                    Severity::Error,
                );
                false
            }
            Err(e) => {
                error!("Error deleting employee {}: {}", employee_id, e);
                self.notify(DELETE_FAILED, Severity::Error);
                false
            }
        }
    }

    pub async fn generate_payroll(&self, employee_id: i64, period: &str) -> bool {
        let request = PayrollRequest::new(employee_id, period);
        match self.api.generate_payroll(&request).await {
            Ok(response) if response.success => {
                info!("Generated payroll for {} ({})", employee_id, period);
                self.notify("Payroll generated successfully", Severity::Success);
                true
            }
            Ok(response) => {
                self.notify(
                    Self::server_message(response.message.as_deref(), PAYROLL_FAILED),
                    Severity::Error,
                );
                false
            }
            Err(e) => {
                error!("Error generating payroll for {}: {}", employee_id, e);
                self.notify(PAYROLL_FAILED, Severity::Error);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use staffsync_lib::api::{
        AttendanceKind, AttendanceResponse, NotificationsResponse, ServerNotification,
        SuccessResponse,
    };
    use staffsync_lib::error::{ApiError, Error};
    use staffsync_ui::notifications::{DEFAULT_DURATION, NotificationCenter};

    use super::*;

    /// Canned responses, consumed in order.
    #[derive(Default)]
    struct FakeApi {
        attendance: Mutex<VecDeque<Result<AttendanceResponse, Error>>>,
        notifications: Mutex<VecDeque<Result<NotificationsResponse, Error>>>,
        acks: Mutex<VecDeque<Result<SuccessResponse, Error>>>,
        payroll_requests: Mutex<Vec<PayrollRequest>>,
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T, Error>>>) -> Result<T, Error> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::http(500, "no canned response").into()))
    }

    #[async_trait]
    impl StaffApi for FakeApi {
        async fn mark_attendance(&self) -> Result<AttendanceResponse, Error> {
            next(&self.attendance)
        }

        async fn notifications(&self) -> Result<NotificationsResponse, Error> {
            next(&self.notifications)
        }

        async fn delete_employee(&self, _employee_id: i64) -> Result<SuccessResponse, Error> {
            next(&self.acks)
        }

        async fn generate_payroll(
            &self,
            request: &PayrollRequest,
        ) -> Result<SuccessResponse, Error> {
            self.payroll_requests.lock().unwrap().push(request.clone());
            next(&self.acks)
        }
    }

    fn setup(api: FakeApi) -> (Actions, NotificationHandle, Arc<FakeApi>) {
        let api = Arc::new(api);
        let handle = NotificationHandle::new(NotificationCenter::new());
        let actions = Actions::new(api.clone(), handle.clone(), DEFAULT_DURATION);
        (actions, handle, api)
    }

    fn shown(handle: &NotificationHandle) -> Vec<(String, Severity)> {
        handle.with(|center| {
            let mut shown: Vec<_> = center
                .active()
                .map(|n| (n.message().to_string(), n.severity()))
                .collect();
            shown.reverse();
            shown
        })
    }

    fn ack(success: bool, message: Option<&str>) -> Result<SuccessResponse, Error> {
        Ok(SuccessResponse {
            success,
            message: message.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_attendance_success() {
        let api = FakeApi::default();
        api.attendance.lock().unwrap().push_back(Ok(AttendanceResponse {
            success: true,
            message: "Checked in successfully".to_string(),
            kind: Some(AttendanceKind::Checkin),
            time: Some("09:00".to_string()),
        }));
        let (actions, handle, _) = setup(api);

        let status = actions.mark_attendance().await;
        assert_eq!(status.as_deref(), Some("Checked in at 09:00"));
        assert_eq!(
            shown(&handle),
            [("Checked in successfully".to_string(), Severity::Success)]
        );
        assert!(!actions.attendance_busy());
    }

    #[tokio::test]
    async fn test_attendance_rejected_uses_server_message() {
        let api = FakeApi::default();
        api.attendance.lock().unwrap().push_back(Ok(AttendanceResponse {
            success: false,
            message: "Already checked in today".to_string(),
            kind: None,
            time: None,
        }));
        let (actions, handle, _) = setup(api);

        assert_eq!(actions.mark_attendance().await, None);
        assert_eq!(
            shown(&handle),
            [("Already checked in today".to_string(), Severity::Error)]
        );
    }

    #[tokio::test]
    async fn test_attendance_transport_failure_rolls_back() {
        let api = FakeApi::default();
        api.attendance
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Timeout(Duration::from_secs(30)).into()));
        let (actions, handle, _) = setup(api);

        assert_eq!(actions.mark_attendance().await, None);
        assert!(!actions.attendance_busy());
        assert_eq!(
            shown(&handle),
            [(ATTENDANCE_FAILED.to_string(), Severity::Error)]
        );
    }

    #[tokio::test]
    async fn test_attendance_ignored_while_busy() {
        let (actions, handle, api) = setup(FakeApi::default());
        actions.attendance_busy.store(true, Ordering::SeqCst);

        assert_eq!(actions.mark_attendance().await, None);
        assert!(shown(&handle).is_empty());
        assert!(actions.attendance_busy());
        assert!(api.attendance.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_poll_shows_each_notification() {
        let api = FakeApi::default();
        api.notifications
            .lock()
            .unwrap()
            .push_back(Ok(NotificationsResponse {
                notifications: vec![
                    ServerNotification {
                        message: "Leave approved".to_string(),
                        kind: "success".to_string(),
                    },
                    ServerNotification {
                        message: "Team meeting at 3".to_string(),
                        kind: "info".to_string(),
                    },
                ],
            }));
        let (actions, handle, _) = setup(api);

        assert_eq!(actions.poll_notifications().await, 2);
        assert_eq!(
            shown(&handle),
            [
                ("Leave approved".to_string(), Severity::Success),
                ("Team meeting at 3".to_string(), Severity::Info),
            ]
        );
    }

    #[tokio::test]
    async fn test_poll_failure_is_silent() {
        let (actions, handle, _) = setup(FakeApi::default());
        assert_eq!(actions.poll_notifications().await, 0);
        assert!(shown(&handle).is_empty());
    }

    #[tokio::test]
    async fn test_delete_employee_outcomes() {
        let api = FakeApi::default();
        {
            let mut acks = api.acks.lock().unwrap();
            acks.push_back(ack(true, None));
            acks.push_back(ack(false, None));
            acks.push_back(ack(false, Some("Employee has payroll records")));
            acks.push_back(Err(ApiError::http(500, "boom").into()));
        }
        let (actions, handle, _) = setup(api);

        assert!(actions.delete_employee(1).await);
        assert!(!actions.delete_employee(2).await);
        assert!(!actions.delete_employee(3).await);
        assert!(!actions.delete_employee(4).await);

        assert_eq!(
            shown(&handle),
            [
                ("Employee deleted successfully".to_string(), Severity::Success),
                (DELETE_FAILED.to_string(), Severity::Error),
                ("Employee has payroll records".to_string(), Severity::Error),
                (DELETE_FAILED.to_string(), Severity::Error),
            ]
        );
    }

    #[tokio::test]
    async fn test_generate_payroll() {
        let api = FakeApi::default();
        api.acks.lock().unwrap().push_back(ack(true, Some("Payroll generated for 1 employees")));
        let (actions, handle, api) = setup(api);

        assert!(actions.generate_payroll(5, "2024-05").await);
        assert_eq!(
            api.payroll_requests.lock().unwrap().as_slice(),
            [PayrollRequest::new(5, "2024-05")]
        );
        assert_eq!(
            shown(&handle),
            [("Payroll generated successfully".to_string(), Severity::Success)]
        );
    }

    #[test]
    fn test_server_message_fallback() {
        assert_eq!(Actions::server_message(Some("  "), "fallback"), "fallback");
        assert_eq!(Actions::server_message(None, "fallback"), "fallback");
        assert_eq!(Actions::server_message(Some("Nope"), "fallback"), "Nope");
    }
}
