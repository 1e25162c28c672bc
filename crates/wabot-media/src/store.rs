// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk media directories.
//!
//! Two scopes: an ephemeral temp directory for transcoder input/output
//! (files always deleted by the end of each invocation, via [`TempPath`])
//! and a durable status directory (one file per downloaded status).

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use wabot_core::digits_only;

use crate::error::MediaError;
use crate::temp::TempPath;

/// Milliseconds since the Unix epoch, used as a collision-resistant file
/// name discriminator at the expected low concurrency.
pub(crate) fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Owns the temporary-media and saved-status directories.
#[derive(Debug, Clone)]
pub struct MediaStore {
    temp_dir: PathBuf,
    status_dir: PathBuf,
}

impl MediaStore {
    pub fn new(temp_dir: impl Into<PathBuf>, status_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            status_dir: status_dir.into(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Writes a buffer to a uniquely named file under the temp directory,
    /// creating the directory if absent. The returned guard removes the
    /// file when dropped.
    ///
    /// `purpose` discriminates concurrent invocations with the same
    /// timestamp (for example `temp` for transcoder input, `sticker` for
    /// its output).
    pub async fn persist_to_temp(
        &self,
        buffer: &[u8],
        purpose: &str,
        extension: &str,
    ) -> Result<TempPath, MediaError> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        let path = self
            .temp_dir
            .join(format!("{purpose}_{}.{extension}", now_millis()));
        tokio::fs::write(&path, buffer).await?;
        debug!(path = %path.display(), bytes = buffer.len(), "persisted temp media");
        Ok(TempPath::new(path))
    }

    /// Reserves a uniquely named path under the temp directory without
    /// creating the file. The transcoder writes it; the guard removes it.
    pub async fn reserve_temp(
        &self,
        purpose: &str,
        extension: &str,
    ) -> Result<TempPath, MediaError> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        let path = self
            .temp_dir
            .join(format!("{purpose}_{}.{extension}", now_millis()));
        Ok(TempPath::new(path))
    }

    /// Durably saves a downloaded status, named by timestamp plus the
    /// sanitized conversation identifier. Returns the written path.
    pub async fn save_status(
        &self,
        buffer: &[u8],
        conversation_id: &str,
        extension: &str,
    ) -> Result<PathBuf, MediaError> {
        tokio::fs::create_dir_all(&self.status_dir).await?;
        let path = self.status_dir.join(format!(
            "{}_{}.{extension}",
            now_millis(),
            digits_only(conversation_id)
        ));
        tokio::fs::write(&path, buffer).await?;
        debug!(path = %path.display(), bytes = buffer.len(), "saved status media");
        Ok(path)
    }
}
