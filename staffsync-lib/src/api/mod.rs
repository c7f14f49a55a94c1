//! StaffSync API endpoints
//!
//! Each endpoint is an inherent method on [`StaffSyncClient`]. The
//! [`StaffApi`] trait exposes the same calls behind a seam so front-ends can
//! be exercised without a server.

mod attendance;
mod employees;
mod notifications;
mod payroll;

pub use attendance::*;
pub use notifications::*;
pub use payroll::*;

use async_trait::async_trait;
use serde::Deserialize;

use crate::StaffSyncClient;
use crate::error::Error;

/// Generic `{ success, message? }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// The StaffSync operations a front-end needs.
#[async_trait]
pub trait StaffApi: Send + Sync {
    async fn mark_attendance(&self) -> Result<AttendanceResponse, Error>;

    async fn notifications(&self) -> Result<NotificationsResponse, Error>;

    async fn delete_employee(&self, employee_id: i64) -> Result<SuccessResponse, Error>;

    async fn generate_payroll(&self, request: &PayrollRequest) -> Result<SuccessResponse, Error>;
}

#[async_trait]
impl StaffApi for StaffSyncClient {
    async fn mark_attendance(&self) -> Result<AttendanceResponse, Error> {
        StaffSyncClient::mark_attendance(self).await
    }

    async fn notifications(&self) -> Result<NotificationsResponse, Error> {
        StaffSyncClient::notifications(self).await
    }

    async fn delete_employee(&self, employee_id: i64) -> Result<SuccessResponse, Error> {
        StaffSyncClient::delete_employee(self, employee_id).await
    }

    async fn generate_payroll(&self, request: &PayrollRequest) -> Result<SuccessResponse, Error> {
        StaffSyncClient::generate_payroll(self, request).await
    }
}
