//! Client side of the CMS web service (XMDS) used to report blacklisted media.

mod client;
mod error;
mod models;

pub use client::XmdsClient;
pub use error::XmdsError;
pub use models::{BlackListRequest, BlacklistReport};

use async_trait::async_trait;

/// Receives blacklist additions that should be reported upstream.
#[async_trait]
pub trait BlacklistNotifier: Send + Sync + 'static {
    /// Reports a single blacklisted media item.
    async fn notify(&self, report: &BlacklistReport) -> Result<(), XmdsError>;
}
