//! Employee management

use reqwest::Method;

use super::SuccessResponse;
use crate::StaffSyncClient;
use crate::error::Error;

impl StaffSyncClient {
    /// Deletes an employee record.
    pub async fn delete_employee(&self, employee_id: i64) -> Result<SuccessResponse, Error> {
        let path = format!("api/employees/{}", employee_id);
        self.request(Method::DELETE, &path, None::<&()>).await
    }
}
