// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single error boundary for command execution.
//!
//! Handlers return `CommandError` instead of sending their own failure
//! replies. The dispatcher turns each variant into at most one reply to
//! the conversation plus a structured log line, so no failure path can
//! double-reply or escape silently.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    /// The argument was missing or malformed; `0` is the usage reply.
    #[error("invalid invocation")]
    Parse(&'static str),

    /// The sender is not allowed to run this command; `0` is the refusal reply.
    #[error("unauthorized")]
    Unauthorized(&'static str),

    /// Fetching media bytes from the gateway failed.
    #[error("media fetch failed: {detail}")]
    MediaFetch { reply: &'static str, detail: String },

    /// The ffmpeg transcode step failed.
    #[error("transcode failed: {detail}")]
    Transcode { reply: &'static str, detail: String },

    /// An upstream HTTP service failed or returned unusable data.
    #[error("upstream failure: {detail}")]
    Upstream { reply: &'static str, detail: String },

    /// Delivering the command's primary payload failed; `reply` is the
    /// fallback notice sent instead.
    #[error("delivery failed: {detail}")]
    Delivery { reply: &'static str, detail: String },

    /// Sending a reply itself failed; there is nothing further to tell
    /// the user.
    #[error("could not respond: {detail}")]
    Respond { detail: String },
}

impl CommandError {
    /// The reply to send back to the conversation, if one applies.
    pub fn user_reply(&self) -> Option<&'static str> {
        match self {
            Self::Parse(reply) | Self::Unauthorized(reply) => Some(reply),
            Self::MediaFetch { reply, .. }
            | Self::Transcode { reply, .. }
            | Self::Upstream { reply, .. }
            | Self::Delivery { reply, .. } => Some(reply),
            Self::Respond { .. } => None,
        }
    }
}
