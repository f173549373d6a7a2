use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::error::BlacklistError;
use super::parser::parse_bulk_xml;
use super::report::ReportHandle;
use super::types::{BlacklistScope, BulkItem, MediaId};
use crate::config::Config;
use crate::xmds::{BlacklistNotifier, BlacklistReport, XmdsClient, XmdsError};

const DEFAULT_REASON: &str = "No reason provided";

/// File-backed list of media the player must not show.
///
/// Entries are appended to a flat file as `[<id>],` tokens. None of the
/// operations return errors: failures are logged and the operation becomes a
/// no-op, so a broken disk or CMS never blocks playback.
#[derive(Clone)]
pub struct BlacklistStore {
    path: PathBuf,
    notifier: Option<Arc<dyn BlacklistNotifier>>,
}

impl fmt::Debug for BlacklistStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlacklistStore")
            .field("path", &self.path)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl BlacklistStore {
    /// Create a local-only store backed by the file at `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            notifier: None,
        }
    }

    /// Report single additions through `notifier`
    pub fn with_notifier(mut self, notifier: Arc<dyn BlacklistNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Create a store in the configured library, reporting to the CMS when an
    /// `xmds` section is present.
    pub fn from_config(config: &Config) -> Result<Self, XmdsError> {
        let store = Self::new(config.library.blacklist_path());

        match &config.xmds {
            Some(xmds) => {
                let client = XmdsClient::new(xmds)?;
                tracing::info!("Blacklist additions will be reported to {}", client.url());
                Ok(store.with_notifier(Arc::new(client)))
            }
            None => {
                tracing::info!("No CMS configured, blacklist is local only");
                Ok(store)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Blacklist a media item locally and report it to the CMS.
    ///
    /// The report runs in the background. Its handle is returned so callers
    /// can await the outcome, but it can simply be dropped. No report is made
    /// without a notifier or for ids that are not integers.
    pub async fn add(&self, id: &str, scope: BlacklistScope, reason: &str) -> Option<ReportHandle> {
        let reason = if reason.trim().is_empty() {
            DEFAULT_REASON
        } else {
            reason
        };

        let media_id = match MediaId::parse(id) {
            Ok(media_id) => media_id,
            Err(e) => {
                tracing::warn!("Cannot add to the blacklist: {}", e);
                return None;
            }
        };

        let handle = match (media_id.as_numeric(), &self.notifier) {
            (Some(numeric), Some(notifier)) => Some(ReportHandle::spawn(
                Arc::clone(notifier),
                BlacklistReport {
                    media_id: numeric,
                    scope,
                    reason: reason.to_string(),
                },
            )),
            (None, Some(_)) => {
                tracing::warn!(
                    "Currently can only report integer media ids, {} is stored locally only",
                    media_id
                );
                None
            }
            (_, None) => None,
        };

        if let Err(e) = self.add_local(&media_id).await {
            tracing::error!("Cannot add {} to the blacklist: {}", media_id, e);
        } else {
            tracing::info!(%scope, reason, "Blacklisted media {}", media_id);
        }

        handle
    }

    /// Blacklist many items locally. Nothing is reported to the CMS.
    ///
    /// Returns the number of entries written.
    pub async fn add_bulk<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = BulkItem>,
    {
        let mut added = 0;

        for item in items {
            let Some(raw) = item.id else {
                tracing::debug!("Skipping bulk blacklist record without an id");
                continue;
            };

            let media_id = match MediaId::parse(&raw) {
                Ok(media_id) => media_id,
                Err(e) => {
                    tracing::debug!("Skipping bulk blacklist record: {}", e);
                    continue;
                }
            };

            match self.add_local(&media_id).await {
                Ok(()) => added += 1,
                Err(e) => tracing::error!("Cannot add {} to the blacklist: {}", media_id, e),
            }
        }

        tracing::info!("Added {} bulk entries to the blacklist", added);
        added
    }

    /// Blacklist every record of an XML bulk document, see [`parse_bulk_xml`].
    pub async fn import_xml(&self, xml: &str) -> usize {
        match parse_bulk_xml(xml) {
            Ok(items) => self.add_bulk(items).await,
            Err(e) => {
                tracing::error!("Cannot import blacklist: {}", e);
                0
            }
        }
    }

    /// Whether `id` is on the blacklist.
    ///
    /// Only whole entries match, so `12` is not blacklisted by `[123],`.
    pub async fn is_blacklisted(&self, id: &str) -> bool {
        let Ok(media_id) = MediaId::parse(id) else {
            return false;
        };

        match self.read_contents().await {
            Ok(Some(contents)) => tokens(&contents).any(|token| token == media_id.as_str()),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Cannot read the blacklist at {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// All stored ids in the order they were added, duplicates included
    pub async fn entries(&self) -> Vec<MediaId> {
        match self.read_contents().await {
            Ok(Some(contents)) => tokens(&contents)
                .filter_map(|token| MediaId::parse(token).ok())
                .collect(),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Cannot read the blacklist at {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Delete the blacklist file
    pub async fn truncate(&self) {
        match fs::remove_file(&self.path).await {
            Ok(()) => tracing::info!("Blacklist truncated"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Blacklist already empty");
            }
            Err(e) => tracing::error!("Cannot truncate the blacklist: {}", e),
        }
    }

    async fn add_local(&self, media_id: &MediaId) -> Result<(), BlacklistError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(media_id.to_token().as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn read_contents(&self) -> Result<Option<String>, BlacklistError> {
        // Invalid bytes are replaced so one corrupt entry does not hide the rest
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Ids between `[` and `],` in the raw file. The last entry may lack its
/// comma, and stray bytes before an entry's `[` are skipped.
fn tokens(contents: &str) -> impl Iterator<Item = &str> {
    contents.split("],").filter_map(|token| {
        let token = token.trim();
        let id = &token[token.rfind('[')? + 1..];
        Some(id.strip_suffix(']').unwrap_or(id))
    })
}
