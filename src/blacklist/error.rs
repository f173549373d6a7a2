use thiserror::Error;

use crate::xmds::XmdsError;

/// Error type for blacklist operations
#[derive(Debug, Error)]
pub enum BlacklistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid media id {0:?}")]
    InvalidId(String),

    #[error("Invalid blacklist scope {0:?}, expected `single` or `all`")]
    InvalidScope(String),

    #[error("Invalid bulk import document: {0}")]
    InvalidFormat(String),

    #[error("Reporting to the CMS failed: {0}")]
    Report(#[from] XmdsError),

    #[error("Report task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
