//! Error types

mod api;
mod config;

pub use api::*;
pub use config::*;

/// Top-level error for the StaffSync client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request failed or the server answered with an error status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Client configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
