// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External transcoder invocation for sticker creation.
//!
//! Runs `ffmpeg` with kind-specific parameters: a static image becomes a
//! lossless webp at frame rate 20; a short video becomes a looping webp at
//! frame rate 15, scaled to fit within 512x512 preserving aspect ratio.
//! The input temp file is deleted after the transcoder finishes or fails;
//! the output guard is returned to the caller, who drops it after the send
//! attempt.

use tokio::process::Command;
use tracing::debug;

use wabot_core::MediaKind;

use crate::error::MediaError;
use crate::store::MediaStore;
use crate::temp::TempPath;

/// Transcodes the file behind `input` into a webp sticker.
///
/// Takes ownership of the input guard; the input file is removed on every
/// exit path. A non-zero transcoder exit surfaces as
/// [`MediaError::Transcode`] and is never retried.
pub async fn transcode_to_sticker(
    store: &MediaStore,
    input: TempPath,
    kind: MediaKind,
) -> Result<TempPath, MediaError> {
    let output = store.reserve_temp("sticker", "webp").await?;

    // The fps/lossless line for images and the fps/scale line for videos
    // match what the gateway accepts as sticker payloads.
    let filter = match kind {
        MediaKind::Image => "fps=fps=20",
        _ => "fps=fps=15,scale=512:512:force_original_aspect_ratio=decrease",
    };

    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-i")
        .arg(input.path())
        .args(["-vcodec", "libwebp", "-filter:v", filter]);
    if kind == MediaKind::Image {
        cmd.args(["-lossless", "1"]);
    }
    cmd.args(["-loop", "0", "-preset", "default", "-an", "-vsync", "0"])
        .arg(output.path());

    let result = cmd.output().await;
    // Input is consumed exactly once; drop it before inspecting the result
    // so transcoder failure cannot leak it.
    drop(input);

    let out = result.map_err(|e| MediaError::Transcode {
        message: format!("failed to run ffmpeg: {e}"),
    })?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        return Err(MediaError::Transcode {
            message: format!("ffmpeg exited with {}: {}", out.status, stderr.trim()),
        });
    }

    debug!(output = %output.path().display(), "sticker transcode complete");
    Ok(output)
}
