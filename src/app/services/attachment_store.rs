//! Attachment storage
//!
//! Uploaded contract documents live outside the record table. The record
//! only keeps the descriptor (URL, original name, upload time) returned by
//! an [`AttachmentStore`].

use crate::app::models::{AttachmentKind, NaturalKey};
use crate::constants::UPLOAD_TIMESTAMP_FORMAT;
use crate::{Error, Result};
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Descriptor of a stored file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    /// Location recorded in the attachment slot
    pub url: String,

    /// Name the file was stored under
    pub stored_name: String,

    /// Upload time, `%Y-%m-%d %H:%M:%S` local time
    pub uploaded_at: String,
}

/// Binary storage for attachments
#[async_trait]
pub trait AttachmentStore: Send + Sync + Debug {
    /// Store `bytes` for the given record slot
    async fn store(
        &self,
        key: &NaturalKey,
        kind: AttachmentKind,
        filename: &str,
        bytes: &[u8],
    ) -> Result<StoredAttachment>;

    /// Remove the file behind `url`, returning whether a file was removed
    async fn remove(&self, url: &str) -> Result<bool>;
}

/// Stores attachments as plain files in one directory
#[derive(Debug, Clone)]
pub struct FsAttachmentStore {
    root: PathBuf,
    url_prefix: String,
}

impl FsAttachmentStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stored file name for a slot: `{tid}_{lokasi}_{kind}_{filename}`
    ///
    /// Each component is escaped so it never contains `_`, which keeps names
    /// of different records apart.
    pub fn stored_name(key: &NaturalKey, kind: AttachmentKind, filename: &str) -> String {
        format!(
            "{}_{}_{}_{}",
            escape_component(&key.tid),
            escape_component(&key.lokasi),
            kind.as_str(),
            escape_component(filename)
        )
    }

    /// Path on disk for a recorded URL
    ///
    /// Only the last URL segment is used, so a URL can never point outside
    /// the storage directory.
    pub fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let name = url.rsplit('/').next()?;
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }
        Some(self.root.join(name))
    }
}

/// Percent-escape characters that would make a stored name ambiguous
pub fn escape_component(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '_' => escaped.push_str("%5F"),
            '/' => escaped.push_str("%2F"),
            '\\' => escaped.push_str("%5C"),
            ':' => escaped.push_str("%3A"),
            '\0' => escaped.push_str("%00"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn store(
        &self,
        key: &NaturalKey,
        kind: AttachmentKind,
        filename: &str,
        bytes: &[u8],
    ) -> Result<StoredAttachment> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::io(format!("Failed to create {}", self.root.display()), e))?;

        let stored_name = Self::stored_name(key, kind, filename);
        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

        info!("Stored {} ({} bytes) for {}", stored_name, bytes.len(), key);

        Ok(StoredAttachment {
            url: format!("{}/{}", self.url_prefix, stored_name),
            stored_name,
            uploaded_at: chrono::Local::now()
                .format(UPLOAD_TIMESTAMP_FORMAT)
                .to_string(),
        })
    }

    async fn remove(&self, url: &str) -> Result<bool> {
        let Some(path) = self.path_for_url(url) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed attachment {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::io(format!("Failed to remove {}", path.display()), e)),
        }
    }
}
