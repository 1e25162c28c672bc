// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message and group data model shared across the Wabot workspace.
//!
//! The payload union is a closed enum with one case per media kind plus
//! text, so restore dispatch and command routing can match exhaustively.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Suffix the gateway uses for group conversation identifiers.
const GROUP_JID_SUFFIX: &str = "@g.us";

/// Returns true if the conversation id denotes a group chat.
pub fn is_group_jid(jid: &str) -> bool {
    jid.ends_with(GROUP_JID_SUFFIX)
}

/// Strips every non-digit character from an identifier.
///
/// Used to compare gateway identifiers (which carry server suffixes) against
/// configured phone numbers, and to sanitize identifiers for file names.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Opaque reference to retrievable binary media, assigned by the gateway.
///
/// A descriptor is consumable exactly once; a second fetch requires a fresh
/// descriptor from the source event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor(pub String);

/// A content descriptor plus the MIME type the gateway reported for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub descriptor: ContentDescriptor,
    pub mime_type: String,
}

/// The media kinds the gateway can stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Document,
    Audio,
    Sticker,
}

/// Tagged payload union for an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePayload {
    Text {
        body: String,
    },
    Image {
        media: MediaRef,
        caption: Option<String>,
    },
    Video {
        media: MediaRef,
        caption: Option<String>,
    },
    Document {
        media: MediaRef,
        file_name: Option<String>,
    },
    Audio {
        media: MediaRef,
    },
    Sticker {
        media: MediaRef,
    },
}

impl MessagePayload {
    /// The unified text surface of a message: plain body, or caption of an
    /// image/video, or the filename of a document, in that precedence order.
    pub fn text_surface(&self) -> &str {
        match self {
            Self::Text { body } => body,
            Self::Image { caption, .. } | Self::Video { caption, .. } => {
                caption.as_deref().unwrap_or("")
            }
            Self::Document { file_name, .. } => file_name.as_deref().unwrap_or(""),
            Self::Audio { .. } | Self::Sticker { .. } => "",
        }
    }

    /// The media reference carried by this payload, if any.
    pub fn media(&self) -> Option<&MediaRef> {
        match self {
            Self::Text { .. } => None,
            Self::Image { media, .. }
            | Self::Video { media, .. }
            | Self::Document { media, .. }
            | Self::Audio { media }
            | Self::Sticker { media } => Some(media),
        }
    }

    /// The media kind of this payload, if it carries binary content.
    pub fn media_kind(&self) -> Option<MediaKind> {
        match self {
            Self::Text { .. } => None,
            Self::Image { .. } => Some(MediaKind::Image),
            Self::Video { .. } => Some(MediaKind::Video),
            Self::Document { .. } => Some(MediaKind::Document),
            Self::Audio { .. } => Some(MediaKind::Audio),
            Self::Sticker { .. } => Some(MediaKind::Sticker),
        }
    }
}

/// An inbound message as delivered by the gateway session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Opaque id, unique within a conversation, assigned by the gateway.
    pub id: String,
    /// The chat this message belongs to (direct or group).
    pub conversation_id: String,
    /// The author. For groups this is the participant id; for direct chats
    /// it equals `conversation_id`.
    pub sender_id: String,
    /// True if the agent itself sent it.
    pub from_self: bool,
    pub payload: MessagePayload,
    /// Participants mentioned in the message body.
    pub mentioned: Vec<String>,
    /// Payload of the message this one replies to, if any. Carries the
    /// media reference needed to fetch quoted status media.
    pub quoted: Option<Box<MessagePayload>>,
    /// Monotonic sequence used only for cache eviction ordering.
    pub received_at: u64,
}

/// An outbound message payload, sent through the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundPayload {
    Text {
        body: String,
        mentions: Vec<String>,
    },
    Image {
        data: Vec<u8>,
        caption: Option<String>,
    },
    Video {
        data: Vec<u8>,
        caption: Option<String>,
    },
    /// A video the gateway fetches itself from a remote URL.
    VideoUrl {
        url: String,
        caption: Option<String>,
    },
    Document {
        data: Vec<u8>,
        file_name: String,
        mime_type: String,
    },
    Audio {
        data: Vec<u8>,
        mime_type: String,
    },
    Sticker {
        data: Vec<u8>,
    },
}

impl OutboundPayload {
    /// Plain text reply with no mentions.
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text {
            body: body.into(),
            mentions: Vec::new(),
        }
    }
}

/// Role of a group participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum ParticipantRole {
    Member,
    Admin,
    #[strum(serialize = "superadmin")]
    SuperAdmin,
}

/// One group member with their role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub role: ParticipantRole,
}

/// Group metadata fetched on demand from the gateway. Never cached locally;
/// admin-gated commands re-fetch this per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMetadata {
    pub subject: String,
    pub participants: Vec<Participant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_ref() -> MediaRef {
        MediaRef {
            descriptor: ContentDescriptor("desc-1".into()),
            mime_type: "image/jpeg".into(),
        }
    }

    #[test]
    fn group_jid_detection() {
        assert!(is_group_jid("12345-67890@g.us"));
        assert!(!is_group_jid("628512345@s.whatsapp.net"));
    }

    #[test]
    fn digits_only_strips_suffix() {
        assert_eq!(digits_only("628512345@s.whatsapp.net"), "628512345");
        assert_eq!(digits_only("+62 851-2345"), "628512345");
    }

    #[test]
    fn text_surface_precedence() {
        let text = MessagePayload::Text {
            body: "hello".into(),
        };
        assert_eq!(text.text_surface(), "hello");

        let image = MessagePayload::Image {
            media: media_ref(),
            caption: Some(".sticker".into()),
        };
        assert_eq!(image.text_surface(), ".sticker");

        let doc = MessagePayload::Document {
            media: media_ref(),
            file_name: Some("report.pdf".into()),
        };
        assert_eq!(doc.text_surface(), "report.pdf");

        let audio = MessagePayload::Audio { media: media_ref() };
        assert_eq!(audio.text_surface(), "");
    }

    #[test]
    fn media_kind_matches_variant() {
        let sticker = MessagePayload::Sticker { media: media_ref() };
        assert_eq!(sticker.media_kind(), Some(MediaKind::Sticker));
        assert!(sticker.media().is_some());

        let text = MessagePayload::Text { body: "hi".into() };
        assert_eq!(text.media_kind(), None);
        assert!(text.media().is_none());
    }

    #[test]
    fn media_kind_display_round_trip() {
        use std::str::FromStr;
        for kind in [
            MediaKind::Image,
            MediaKind::Video,
            MediaKind::Document,
            MediaKind::Audio,
            MediaKind::Sticker,
        ] {
            let s = kind.to_string();
            assert_eq!(MediaKind::from_str(&s).expect("round trip"), kind);
        }
    }

    #[test]
    fn participant_role_parses_superadmin() {
        use std::str::FromStr;
        assert_eq!(
            ParticipantRole::from_str("superadmin").expect("parse"),
            ParticipantRole::SuperAdmin
        );
        assert_eq!(ParticipantRole::SuperAdmin.to_string(), "superadmin");
    }
}
