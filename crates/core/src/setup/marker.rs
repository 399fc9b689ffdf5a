//! Persisted "setup complete" flag.
//!
//! Completion is the presence of a marker file. The file is written to a
//! temporary sibling, flushed, and renamed into place, so a reader either
//! sees the finished marker or nothing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::CoreError;

/// Contents of the marker file.
const MARKER_CONTENTS: &[u8] = b"complete";

/// Load/store interface for the completion flag.
///
/// There is no way to clear the flag.
#[async_trait]
pub trait SetupState: Send + Sync {
    async fn is_complete(&self) -> bool;

    /// Idempotent: marking an already-complete state succeeds.
    async fn mark_complete(&self) -> Result<(), CoreError>;
}

/// [`SetupState`] backed by a file at a well-known path.
#[derive(Debug, Clone)]
pub struct FileMarker {
    path: PathBuf,
}

impl FileMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "setup.complete".to_string());
        self.path
            .with_file_name(format!(".{name}.tmp-{}", std::process::id()))
    }

    async fn write_atomically(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        let written: std::io::Result<()> = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(MARKER_CONTENTS).await?;
            file.sync_all().await?;
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if written.is_err() {
            let _ = tokio::fs::remove_file(&tmp).await;
        }
        written
    }
}

#[async_trait]
impl SetupState for FileMarker {
    async fn is_complete(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn mark_complete(&self) -> Result<(), CoreError> {
        self.write_atomically().await.map_err(|e| {
            CoreError::MarkerWrite(format!("{}: {e}", self.path.display()))
        })?;
        tracing::info!(marker = %self.path.display(), "Completion marker written");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
