// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Wabot chat automation agent.
//!
//! Provides the shared data model (messages, payloads, group metadata),
//! the [`Gateway`] session boundary trait, and the workspace error type.

pub mod error;
pub mod gateway;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::WabotError;
pub use gateway::{
    ConnectionUpdate, DeletionNotice, Gateway, GatewayEvent, MediaStream, ParticipantAction,
};
pub use types::{
    ContentDescriptor, GroupMetadata, InboundMessage, MediaKind, MediaRef, MessagePayload,
    OutboundPayload, Participant, ParticipantRole, digits_only, is_group_jid,
};
