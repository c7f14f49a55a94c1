//! Errors that stop the command-line client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] staffsync_lib::error::Error),
    #[error(transparent)]
    Config(#[from] staffsync_lib::error::ConfigError),
    #[error("table error: {0}")]
    Table(#[from] staffsync_ui::table::TableError),
    #[error("invalid table file: {0}")]
    TableFile(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
