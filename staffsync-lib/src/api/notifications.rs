//! Server-side notification polling

use reqwest::Method;
use serde::Deserialize;

use crate::StaffSyncClient;
use crate::error::Error;

/// A notification queued by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerNotification {
    pub message: String,
    /// Severity name such as `info`, `success` or `error`.
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Response from `GET /api/notifications`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationsResponse {
    #[serde(default)]
    pub notifications: Vec<ServerNotification>,
}

impl StaffSyncClient {
    /// Fetches pending notifications, in server order.
    pub async fn notifications(&self) -> Result<NotificationsResponse, Error> {
        self.request(Method::GET, "api/notifications", None::<&()>)
            .await
    }
}
