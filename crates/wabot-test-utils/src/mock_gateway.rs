// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock gateway session for deterministic testing.
//!
//! `MockGateway` implements [`Gateway`] with captured outbound traffic,
//! scripted group metadata, and scripted one-shot media content for
//! assertion in router and event-loop tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use wabot_core::{
    Gateway, GroupMetadata, MediaKind, MediaRef, MediaStream, OutboundPayload, WabotError,
};

/// A recorded group mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupMutation {
    Subject { group_id: String, subject: String },
    Description { group_id: String, description: String },
    Removed { group_id: String, participants: Vec<String> },
}

/// A mock messaging gateway for testing.
///
/// Outbound messages passed to `send()` are captured and retrievable via
/// `sent()`. Group metadata and media content are injected up front;
/// media descriptors are one-shot, mirroring the real transport.
#[derive(Default)]
pub struct MockGateway {
    sent: Mutex<Vec<(String, OutboundPayload)>>,
    mutations: Mutex<Vec<GroupMutation>>,
    groups: Mutex<HashMap<String, GroupMetadata>>,
    media: Mutex<HashMap<String, Vec<u8>>>,
    fail_sends: AtomicBool,
    fail_downloads: AtomicBool,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Scripts the metadata returned for a group id.
    pub async fn set_group_metadata(&self, group_id: &str, metadata: GroupMetadata) {
        self.groups
            .lock()
            .await
            .insert(group_id.to_string(), metadata);
    }

    /// Scripts the bytes behind a content descriptor. Consumable once.
    pub async fn set_media_content(&self, descriptor: &str, bytes: Vec<u8>) {
        self.media
            .lock()
            .await
            .insert(descriptor.to_string(), bytes);
    }

    /// Makes every subsequent `send()` fail.
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    /// Makes every subsequent `download_content()` fail.
    pub fn fail_downloads(&self) {
        self.fail_downloads.store(true, Ordering::SeqCst);
    }

    /// All captured sends, in order.
    pub async fn sent(&self) -> Vec<(String, OutboundPayload)> {
        self.sent.lock().await.clone()
    }

    /// Captured payloads sent to one conversation.
    pub async fn sent_to(&self, conversation_id: &str) -> Vec<OutboundPayload> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(to, _)| to == conversation_id)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    /// Text bodies sent to one conversation, ignoring media payloads.
    pub async fn texts_sent_to(&self, conversation_id: &str) -> Vec<String> {
        self.sent_to(conversation_id)
            .await
            .into_iter()
            .filter_map(|payload| match payload {
                OutboundPayload::Text { body, .. } => Some(body),
                _ => None,
            })
            .collect()
    }

    /// All recorded group mutations, in order.
    pub async fn mutations(&self) -> Vec<GroupMutation> {
        self.mutations.lock().await.clone()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn send(&self, to: &str, payload: OutboundPayload) -> Result<(), WabotError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(WabotError::gateway("mock send failure"));
        }
        self.sent.lock().await.push((to.to_string(), payload));
        Ok(())
    }

    async fn group_metadata(&self, group_id: &str) -> Result<GroupMetadata, WabotError> {
        self.groups
            .lock()
            .await
            .get(group_id)
            .cloned()
            .ok_or_else(|| WabotError::gateway(format!("no metadata for {group_id}")))
    }

    async fn update_group_subject(&self, group_id: &str, subject: &str) -> Result<(), WabotError> {
        self.mutations.lock().await.push(GroupMutation::Subject {
            group_id: group_id.to_string(),
            subject: subject.to_string(),
        });
        Ok(())
    }

    async fn update_group_description(
        &self,
        group_id: &str,
        description: &str,
    ) -> Result<(), WabotError> {
        self.mutations
            .lock()
            .await
            .push(GroupMutation::Description {
                group_id: group_id.to_string(),
                description: description.to_string(),
            });
        Ok(())
    }

    async fn remove_participants(
        &self,
        group_id: &str,
        participants: &[String],
    ) -> Result<(), WabotError> {
        self.mutations.lock().await.push(GroupMutation::Removed {
            group_id: group_id.to_string(),
            participants: participants.to_vec(),
        });
        Ok(())
    }

    async fn download_content(
        &self,
        media: &MediaRef,
        _kind: MediaKind,
    ) -> Result<MediaStream, WabotError> {
        if self.fail_downloads.load(Ordering::SeqCst) {
            return Err(WabotError::gateway("mock download failure"));
        }
        // Descriptors are one-shot: taking the bytes consumes them.
        let bytes = self
            .media
            .lock()
            .await
            .remove(&media.descriptor.0)
            .ok_or_else(|| WabotError::gateway("content descriptor expired or unknown"))?;

        // Deliver in two chunks so concatenation is exercised.
        let mid = bytes.len() / 2;
        let chunks = vec![Ok(bytes[..mid].to_vec()), Ok(bytes[mid..].to_vec())];
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use wabot_core::ContentDescriptor;

    #[tokio::test]
    async fn send_is_captured_per_conversation() {
        let gateway = MockGateway::new();
        gateway
            .send("chat-a", OutboundPayload::text("hello"))
            .await
            .unwrap();
        gateway
            .send("chat-b", OutboundPayload::text("other"))
            .await
            .unwrap();

        assert_eq!(gateway.texts_sent_to("chat-a").await, vec!["hello"]);
        assert_eq!(gateway.sent().await.len(), 2);
    }

    #[tokio::test]
    async fn media_descriptor_is_one_shot() {
        let gateway = MockGateway::new();
        gateway.set_media_content("desc-1", b"payload".to_vec()).await;
        let media = MediaRef {
            descriptor: ContentDescriptor("desc-1".into()),
            mime_type: "image/jpeg".into(),
        };

        let mut stream = gateway
            .download_content(&media, MediaKind::Image)
            .await
            .unwrap();
        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(collected, b"payload");

        // Second fetch requires a fresh descriptor.
        assert!(
            gateway
                .download_content(&media, MediaKind::Image)
                .await
                .is_err()
        );
    }
}
