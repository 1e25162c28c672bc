// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoped temporary-file ownership.
//!
//! Every temp file the pipeline creates is held by a [`TempPath`] guard so
//! it is removed on every exit path, including the success path. Cleanup is
//! best-effort and never masks the error that is already in flight.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Owns a temporary file and deletes it on drop.
#[derive(Debug)]
pub struct TempPath {
    path: PathBuf,
}

impl TempPath {
    /// Takes ownership of an existing file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove temp file");
            }
        }
    }
}
