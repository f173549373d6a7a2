use std::sync::Arc;

use tokio::task::JoinHandle;

use super::error::BlacklistError;
use crate::xmds::{BlacklistNotifier, BlacklistReport, XmdsError};

/// Background report of a blacklist addition to the CMS.
///
/// The report runs on its own task and logs its outcome when it finishes.
/// Dropping the handle detaches the task; await [`outcome`](Self::outcome) to
/// observe the result instead.
#[derive(Debug)]
pub struct ReportHandle {
    media_id: i32,
    task: JoinHandle<Result<(), XmdsError>>,
}

impl ReportHandle {
    /// Spawns the report on the current tokio runtime.
    pub(crate) fn spawn(notifier: Arc<dyn BlacklistNotifier>, report: BlacklistReport) -> Self {
        let media_id = report.media_id;
        let task = tokio::spawn(async move {
            let result = notifier.notify(&report).await;
            match &result {
                Ok(()) => tracing::info!(media_id, "Blacklist sending complete"),
                Err(e) => tracing::error!(media_id, "Error sending blacklist: {}", e),
            }
            result
        });

        Self { media_id, task }
    }

    pub fn media_id(&self) -> i32 {
        self.media_id
    }

    /// Waits for the report to finish.
    pub async fn outcome(self) -> Result<(), BlacklistError> {
        Ok(self.task.await??)
    }
}
