// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media pipeline for the Wabot agent.
//!
//! Streams binary content from the gateway's one-shot content descriptors,
//! persists it under scoped directories, and invokes the external ffmpeg
//! transcoder for sticker creation. Temporary files are owned by drop
//! guards so they are cleaned up on every exit path.

pub mod error;
pub mod sticker;
pub mod store;
pub mod temp;

use futures::StreamExt;

pub use error::MediaError;
pub use sticker::transcode_to_sticker;
pub use store::MediaStore;
pub use temp::TempPath;

use wabot_core::{MediaKind, MediaStream};

/// Drains a one-shot content stream into a single buffer.
///
/// The descriptor behind the stream is consumed exactly once; a second
/// fetch requires a fresh descriptor from the source event.
pub async fn fetch_binary(mut stream: MediaStream) -> Result<Vec<u8>, MediaError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| MediaError::Fetch {
            message: e.to_string(),
        })?;
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}

/// File extension used when persisting media of a given kind.
pub fn extension_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "jpg",
        MediaKind::Video => "mp4",
        MediaKind::Document => "bin",
        MediaKind::Audio => "ogg",
        MediaKind::Sticker => "webp",
    }
}
