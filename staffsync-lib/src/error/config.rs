//! Configuration error types

/// Errors raised while loading client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        /// Variable name.
        var: String,
        /// Raw value found.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The server URL cannot be parsed.
    #[error("invalid server URL {0:?}")]
    InvalidUrl(String),
}

impl ConfigError {
    pub fn invalid_value(
        var: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            var: var.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
