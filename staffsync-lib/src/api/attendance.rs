//! Attendance check-in / check-out

use reqwest::Method;
use serde::Deserialize;

use crate::StaffSyncClient;
use crate::error::Error;

/// Whether a mark recorded arrival or departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceKind {
    Checkin,
    Checkout,
}

/// Response from `POST /api/mark_attendance`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendanceResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<AttendanceKind>,
    /// Server-formatted time of the mark.
    #[serde(default)]
    pub time: Option<String>,
}

impl AttendanceResponse {
    /// Status line for the dashboard, e.g. `Checked in at 09:02`.
    ///
    /// `None` unless the mark succeeded and the server said what it was.
    pub fn status_line(&self) -> Option<String> {
        if !self.success {
            return None;
        }
        let time = self.time.as_deref().unwrap_or("-");
        match self.kind? {
            AttendanceKind::Checkin => Some(format!("Checked in at {}", time)),
            AttendanceKind::Checkout => Some(format!("Checked out at {}", time)),
        }
    }
}

impl StaffSyncClient {
    /// Marks attendance for the signed-in employee.
    ///
    /// The server decides whether this is a check-in or a check-out.
    pub async fn mark_attendance(&self) -> Result<AttendanceResponse, Error> {
        self.request(Method::POST, "api/mark_attendance", None::<&()>)
            .await
    }
}
