// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The messaging-gateway session boundary.
//!
//! Everything the agent consumes from the session provider is expressed
//! here: the [`Gateway`] trait for outbound operations and media transport,
//! and [`GatewayEvent`] for the event stream the session delivers.
//! Authentication, socket lifecycle, and the wire protocol live in the
//! session adapter, outside this workspace's concern.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::WabotError;
use crate::types::{GroupMetadata, InboundMessage, MediaKind, MediaRef, OutboundPayload};

/// A finite, one-shot sequence of binary chunks for a content descriptor.
///
/// The stream is not restartable; draining it consumes the descriptor.
pub type MediaStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, WabotError>> + Send>>;

/// Outbound operations of the messaging-gateway session.
///
/// The agent is single-session: one implementation instance is shared by
/// the event loop and every command handler.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Sends a message to a conversation.
    async fn send(&self, to: &str, payload: OutboundPayload) -> Result<(), WabotError>;

    /// Fetches group metadata (subject plus participants with roles).
    async fn group_metadata(&self, group_id: &str) -> Result<GroupMetadata, WabotError>;

    /// Renames a group.
    async fn update_group_subject(&self, group_id: &str, subject: &str) -> Result<(), WabotError>;

    /// Updates a group's description.
    async fn update_group_description(
        &self,
        group_id: &str,
        description: &str,
    ) -> Result<(), WabotError>;

    /// Removes participants from a group.
    async fn remove_participants(
        &self,
        group_id: &str,
        participants: &[String],
    ) -> Result<(), WabotError>;

    /// Streams the binary content behind a media reference.
    ///
    /// Fails if the descriptor is expired or invalid (for example a status
    /// older than its gateway-side retention window).
    async fn download_content(
        &self,
        media: &MediaRef,
        kind: MediaKind,
    ) -> Result<MediaStream, WabotError>;
}

/// Connection-state change reported by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionUpdate {
    /// Session established and ready.
    Open,
    /// Session closed. `logged_out` distinguishes an authoritative logout
    /// (re-pairing required) from a recoverable disconnect.
    Closed { logged_out: bool },
}

/// Membership change action in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantAction {
    Add,
    Remove,
    Promote,
    Demote,
}

/// A message-deletion notification. Carries only identifiers, never the
/// original content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionNotice {
    pub conversation_id: String,
    pub message_id: String,
}

/// Events delivered by the gateway session, one batch at a time.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    Connection(ConnectionUpdate),
    /// Session credentials changed; persistence is the session adapter's
    /// concern, surfaced here for observability.
    CredentialsUpdate,
    GroupParticipants {
        group_id: String,
        action: ParticipantAction,
        participants: Vec<String>,
    },
    MessagesDeleted(Vec<DeletionNotice>),
    Messages(Vec<InboundMessage>),
}
