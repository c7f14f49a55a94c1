//! Payroll generation

use reqwest::Method;
use serde::Serialize;

use super::SuccessResponse;
use crate::StaffSyncClient;
use crate::error::Error;

/// Body of `POST /api/payroll/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRequest {
    pub employee_id: i64,
    /// Pay period label, e.g. `2024-05`.
    pub period: String,
}

impl PayrollRequest {
    pub fn new(employee_id: i64, period: impl Into<String>) -> Self {
        Self {
            employee_id,
            period: period.into(),
        }
    }
}

impl StaffSyncClient {
    /// Generates payroll for one employee and period.
    pub async fn generate_payroll(&self, request: &PayrollRequest) -> Result<SuccessResponse, Error> {
        self.request(Method::POST, "api/payroll/generate", Some(request))
            .await
    }
}
