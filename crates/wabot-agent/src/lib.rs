// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The agent event loop.
//!
//! Consumes gateway events from a channel and drives the rest of the
//! system: inbound messages are cached and dispatched to the router,
//! deletion notices update the per-conversation recovery slot, and
//! membership changes produce group announcements. The loop owns the
//! deleted-message cache; nothing else mutates it.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use wabot_cache::DeletedMessageCache;
use wabot_core::{ConnectionUpdate, Gateway, GatewayEvent, OutboundPayload, ParticipantAction};
use wabot_router::{Router, mention_tag};

/// Announcement text for one membership change.
pub fn announcement(action: ParticipantAction, participant_id: &str, subject: &str) -> String {
    let tag = mention_tag(participant_id);
    match action {
        ParticipantAction::Add => format!("👋 Selamat datang {tag} di *{subject}*!"),
        ParticipantAction::Remove => format!("😢 {tag} keluar dari grup."),
        ParticipantAction::Promote => format!("🔼 {tag} kini menjadi admin."),
        ParticipantAction::Demote => format!("🔽 {tag} tidak lagi admin."),
    }
}

/// Drives the agent until the channel closes or the session logs out.
pub struct EventLoop {
    gateway: Arc<dyn Gateway>,
    router: Router,
    cache: DeletedMessageCache,
}

impl EventLoop {
    pub fn new(gateway: Arc<dyn Gateway>, router: Router) -> Self {
        Self {
            gateway,
            router,
            cache: DeletedMessageCache::new(),
        }
    }

    /// Runs until the event channel closes or the session reports an
    /// authoritative logout. A recoverable disconnect keeps the loop
    /// alive; reconnecting is the session adapter's job.
    pub async fn run(mut self, mut events: mpsc::Receiver<GatewayEvent>) {
        while let Some(event) = events.recv().await {
            if self.process(event).await.is_break() {
                break;
            }
        }
        info!("event loop stopped");
    }

    async fn process(&mut self, event: GatewayEvent) -> ControlFlow<()> {
        match event {
            GatewayEvent::Connection(ConnectionUpdate::Open) => {
                info!("session connected");
            }
            GatewayEvent::Connection(ConnectionUpdate::Closed { logged_out }) => {
                if logged_out {
                    warn!("session logged out, re-pairing required");
                    return ControlFlow::Break(());
                }
                info!("session closed, waiting for reconnect");
            }
            GatewayEvent::CredentialsUpdate => {
                debug!("session credentials updated");
            }
            GatewayEvent::GroupParticipants {
                group_id,
                action,
                participants,
            } => {
                self.announce(&group_id, action, &participants).await;
            }
            GatewayEvent::MessagesDeleted(notices) => {
                for notice in notices {
                    self.cache
                        .record_deletion(&notice.conversation_id, &notice.message_id);
                    debug!(
                        conversation = %notice.conversation_id,
                        message = %notice.message_id,
                        "deletion recorded"
                    );
                }
            }
            GatewayEvent::Messages(messages) => {
                for msg in messages {
                    if msg.from_self {
                        continue;
                    }
                    // Cache before dispatch so a later deletion of this
                    // very message is recoverable.
                    self.cache.put(msg.clone());
                    self.router.handle(&msg, &self.cache).await;
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// Sends a membership announcement per affected participant. Both the
    /// metadata fetch and the sends are best effort; a missing subject
    /// falls back to a generic one.
    async fn announce(&self, group_id: &str, action: ParticipantAction, participants: &[String]) {
        let subject = match self.gateway.group_metadata(group_id).await {
            Ok(metadata) => metadata.subject,
            Err(err) => {
                debug!(group = %group_id, error = %err, "no metadata for announcement");
                "grup ini".to_string()
            }
        };
        for participant in participants {
            let payload = OutboundPayload::Text {
                body: announcement(action, participant, &subject),
                mentions: vec![participant.clone()],
            };
            if let Err(err) = self.gateway.send(group_id, payload).await {
                warn!(group = %group_id, error = %err, "announcement not delivered");
            }
        }
    }
}
