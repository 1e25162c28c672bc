// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the media pipeline.

use thiserror::Error;

/// Errors raised while fetching, persisting, or transcoding media.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The gateway-side content stream failed or the descriptor was
    /// expired/invalid.
    #[error("media fetch failed: {message}")]
    Fetch { message: String },

    /// The external transcoder failed. Never retried automatically.
    #[error("transcode failed: {message}")]
    Transcode { message: String },

    /// Local filesystem failure while persisting or reading media.
    #[error("media io error: {0}")]
    Io(#[from] std::io::Error),
}
