//! Main StaffSyncClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{ApiError, Error};

/// Client for the StaffSync JSON API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks.
///
/// # Example
///
/// ```ignore
/// use staffsync_lib::StaffSyncClient;
///
/// let client = StaffSyncClient::builder()
///     .url("http://127.0.0.1:5000")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let response = client.mark_attendance().await?;
/// ```
#[derive(Debug, Clone)]
pub struct StaffSyncClient {
    inner: Arc<StaffSyncClientInner>,
}

#[derive(Debug)]
struct StaffSyncClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl StaffSyncClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> StaffSyncClientBuilder<Missing> {
        StaffSyncClientBuilder::new()
    }

    /// Builds a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::builder()
            .url(config.url.as_str())
            .timeout(config.timeout)
            .build()
    }

    /// Returns the base URL of the server.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// Non-2xx statuses become [`ApiError::Http`]; bodies that do not decode
    /// become [`ApiError::Parse`].
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self
            .inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))?;

        log::debug!("{} {}", method, url);

        let mut request = self.inner.http_client.request(method, url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ApiError::from_body(status.as_u16(), &text).into());
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => Err(ApiError::parse_with_body(e.to_string(), text).into()),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::from(e),
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`StaffSyncClient`].
///
/// Uses the typestate pattern to ensure the URL is set at compile time.
pub struct StaffSyncClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
}

impl StaffSyncClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
        }
    }

    /// Sets the server URL.
    ///
    /// A path prefix is kept: `https://host/staff` serves `/staff/api/...`.
    pub fn url(self, url: impl Into<String>) -> StaffSyncClientBuilder<Set<String>> {
        StaffSyncClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
        }
    }
}

impl Default for StaffSyncClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> StaffSyncClientBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl StaffSyncClientBuilder<Set<String>> {
    /// Builds the [`StaffSyncClient`].
    pub fn build(self) -> Result<StaffSyncClient, Error> {
        let raw = self.url.0;
        let mut base_url =
            Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
        // Joining relative paths replaces the last segment unless it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder().build().map_err(ApiError::from)?;

        Ok(StaffSyncClient {
            inner: Arc::new(StaffSyncClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
