// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command routing for the Wabot agent.
//!
//! The router owns no connection state. Each inbound message flows
//! through parse, table lookup, authorization, and execution; every
//! failure funnels into [`CommandError`], which the dispatcher converts
//! into at most one reply plus a log line.

pub mod auth;
pub mod commands;
pub mod error;
pub mod parse;
pub mod texts;

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use sysinfo::System;
use tracing::{debug, info, trace, warn};

use wabot_cache::DeletedMessageCache;
use wabot_config::WabotConfig;
use wabot_core::{
    Gateway, GroupMetadata, InboundMessage, MediaKind, MediaRef, MessagePayload, OutboundPayload,
    is_group_jid,
};
use wabot_media::{MediaStore, extension_for, fetch_binary, transcode_to_sticker};
use wabot_openai::OpenAiClient;
use wabot_tikwm::TikwmClient;

pub use commands::{Access, Command, CommandSpec, lookup};
pub use error::CommandError;
pub use parse::{CommandInvocation, TRIGGER, parse};

/// Formats a duration in seconds as the uptime line of the runtime card.
pub fn format_uptime(total_seconds: u64) -> String {
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{h} Jam {m} Menit {s} Detik")
}

/// Mention tag for a participant id, `@` followed by the part before `@`.
pub fn mention_tag(participant_id: &str) -> String {
    let bare = participant_id
        .split_once('@')
        .map_or(participant_id, |(head, _)| head);
    format!("@{bare}")
}

/// Stateless command dispatcher.
///
/// Holds the gateway handle, upstream clients, and the configuration
/// snapshot taken at startup. Mutable session state (the deleted-message
/// cache) is passed into [`Router::handle`] by the event loop that owns it.
pub struct Router {
    gateway: Arc<dyn Gateway>,
    ai: Option<OpenAiClient>,
    tiktok: TikwmClient,
    media: MediaStore,
    agent_name: String,
    ai_model: String,
    owner_number: String,
    owner_name: String,
    owner_jid: String,
    notify_requester: bool,
    started: Instant,
    started_at: DateTime<Local>,
}

impl Router {
    /// Builds a router from the loaded configuration.
    ///
    /// A missing AI api key disables the `.ai` command rather than
    /// failing startup; everything else keeps working.
    pub fn new(gateway: Arc<dyn Gateway>, config: &WabotConfig) -> Self {
        let ai = match OpenAiClient::new(&config.ai) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(error = %err, "AI client unavailable, .ai is disabled");
                None
            }
        };
        Self {
            gateway,
            ai,
            tiktok: TikwmClient::new(&config.tiktok),
            media: MediaStore::new(&config.media.temp_dir, &config.media.status_dir),
            agent_name: config.agent.name.clone(),
            ai_model: config.ai.model.clone(),
            owner_number: config.owner.number.clone(),
            owner_name: config.owner.name.clone(),
            owner_jid: config.owner.jid(),
            notify_requester: config.media.notify_requester,
            started: Instant::now(),
            started_at: Local::now(),
        }
    }

    /// Routes one inbound message.
    ///
    /// Non-command text and unknown tokens are ignored. Command failures
    /// are logged and answered with the error's user reply, best effort;
    /// this method itself never fails.
    pub async fn handle(&self, msg: &InboundMessage, cache: &DeletedMessageCache) {
        if msg.from_self {
            return;
        }
        let Some(invocation) = parse(msg.payload.text_surface()) else {
            trace!(
                conversation = %msg.conversation_id,
                sender = %msg.sender_id,
                "non-command message"
            );
            return;
        };
        let Some(spec) = lookup(&invocation.command) else {
            debug!(token = %invocation.command, "unknown command token");
            return;
        };
        info!(
            command = spec.token,
            conversation = %msg.conversation_id,
            sender = %msg.sender_id,
            "dispatching command"
        );

        let result = match self.authorize(spec, msg).await {
            Ok(metadata) => {
                self.execute(spec.command, msg, &invocation, metadata, cache)
                    .await
            }
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            warn!(command = spec.token, error = %err, "command failed");
            if let Some(reply) = err.user_reply() {
                let sent = self
                    .gateway
                    .send(&msg.conversation_id, OutboundPayload::text(reply))
                    .await;
                if let Err(send_err) = sent {
                    warn!(command = spec.token, error = %send_err, "failure reply not delivered");
                }
            }
        }
    }

    /// Checks the sender against the command's access level.
    ///
    /// Group metadata is fetched fresh on every admin-gated invocation
    /// and returned so handlers never re-fetch within one dispatch.
    async fn authorize(
        &self,
        spec: &CommandSpec,
        msg: &InboundMessage,
    ) -> Result<Option<GroupMetadata>, CommandError> {
        match spec.access {
            Access::Open => Ok(None),
            Access::Owner => {
                if auth::is_owner(&msg.sender_id, &self.owner_number) {
                    Ok(None)
                } else {
                    Err(CommandError::Unauthorized(texts::OWNER_ONLY))
                }
            }
            Access::GroupAdmin => {
                if !is_group_jid(&msg.conversation_id) {
                    return Err(CommandError::Unauthorized(texts::GROUP_ONLY));
                }
                let metadata = self
                    .gateway
                    .group_metadata(&msg.conversation_id)
                    .await
                    .map_err(|e| CommandError::Respond {
                        detail: format!("group metadata fetch failed: {e}"),
                    })?;
                if !auth::is_group_admin(&metadata.participants, &msg.sender_id) {
                    return Err(CommandError::Unauthorized(commands::admin_refusal(
                        spec.command,
                    )));
                }
                Ok(Some(metadata))
            }
        }
    }

    async fn execute(
        &self,
        command: Command,
        msg: &InboundMessage,
        invocation: &CommandInvocation,
        metadata: Option<GroupMetadata>,
        cache: &DeletedMessageCache,
    ) -> Result<(), CommandError> {
        match command {
            Command::Menu => self.reply(msg, texts::menu_card()).await,
            Command::Owner => {
                self.reply(msg, texts::owner_card(&self.owner_name, &self.owner_number))
                    .await
            }
            Command::Bot => {
                self.reply(msg, texts::bot_card(&self.agent_name, &self.ai_model))
                    .await
            }
            Command::Runtime => self.cmd_runtime(msg).await,
            Command::Ai => self.cmd_ai(msg, &invocation.argument).await,
            Command::Ttdl => self.cmd_ttdl(msg, &invocation.argument).await,
            Command::Sticker => self.cmd_sticker(msg).await,
            Command::SaveStatus => self.cmd_save_status(msg).await,
            Command::SetName => self.cmd_set_name(msg, &invocation.argument).await,
            Command::SetDesc => self.cmd_set_desc(msg, &invocation.argument).await,
            Command::Kick => self.cmd_kick(msg).await,
            Command::TagAll => self.cmd_tag_all(msg, metadata).await,
            Command::Recover => self.cmd_recover(msg, cache).await,
        }
    }

    async fn cmd_runtime(&self, msg: &InboundMessage) -> Result<(), CommandError> {
        let sys = System::new_all();
        let cpu_model = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let total_mem_mb = sys.total_memory() / 1024 / 1024;
        let used_mem_mb = sys.used_memory() / 1024 / 1024;
        let card = texts::runtime_card(&texts::RuntimeInfo {
            uptime: format_uptime(self.started.elapsed().as_secs()),
            cpu_model,
            used_mem_mb,
            total_mem_mb,
            started_at: self.started_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        self.reply(msg, card).await
    }

    async fn cmd_ai(&self, msg: &InboundMessage, argument: &str) -> Result<(), CommandError> {
        if argument.is_empty() {
            return Err(CommandError::Parse(texts::AI_USAGE));
        }
        self.reply(msg, texts::AI_THINKING).await?;
        let client = self.ai.as_ref().ok_or_else(|| CommandError::Upstream {
            reply: texts::AI_FAILED,
            detail: "AI client not configured".to_string(),
        })?;
        let answer = client
            .ask(argument)
            .await
            .map_err(|e| CommandError::Upstream {
                reply: texts::AI_FAILED,
                detail: e.to_string(),
            })?;
        self.reply(msg, answer).await
    }

    async fn cmd_ttdl(&self, msg: &InboundMessage, argument: &str) -> Result<(), CommandError> {
        if argument.is_empty() {
            return Err(CommandError::Parse(texts::TTDL_USAGE));
        }
        self.reply(msg, texts::TTDL_PROCESSING).await?;
        let data = self
            .tiktok
            .lookup(argument)
            .await
            .map_err(|e| CommandError::Upstream {
                reply: texts::TTDL_FAILED,
                detail: e.to_string(),
            })?
            .ok_or_else(|| CommandError::Upstream {
                reply: texts::TTDL_NO_DATA,
                detail: "response carried no video data".to_string(),
            })?;
        let url = data.playable_url().ok_or_else(|| CommandError::Upstream {
            reply: texts::TTDL_NO_VIDEO,
            detail: "no playable variant in response".to_string(),
        })?;
        self.send(
            msg,
            OutboundPayload::VideoUrl {
                url: url.to_string(),
                caption: Some(texts::TTDL_CAPTION.to_string()),
            },
        )
        .await
    }

    async fn cmd_sticker(&self, msg: &InboundMessage) -> Result<(), CommandError> {
        let (media, kind) = match &msg.payload {
            MessagePayload::Image { media, .. } => (media, MediaKind::Image),
            MessagePayload::Video { media, .. } => (media, MediaKind::Video),
            _ => return Err(CommandError::Parse(texts::STICKER_USAGE)),
        };
        let buffer = self.download(media, kind, texts::STICKER_FAILED).await?;
        let input = self
            .media
            .persist_to_temp(&buffer, "temp", extension_for(kind))
            .await
            .map_err(|e| CommandError::Transcode {
                reply: texts::STICKER_FAILED,
                detail: e.to_string(),
            })?;
        let output = transcode_to_sticker(&self.media, input, kind)
            .await
            .map_err(|e| CommandError::Transcode {
                reply: texts::STICKER_TRANSCODE_FAILED,
                detail: e.to_string(),
            })?;
        let data =
            tokio::fs::read(output.path())
                .await
                .map_err(|e| CommandError::Transcode {
                    reply: texts::STICKER_SEND_FAILED,
                    detail: e.to_string(),
                })?;
        match self
            .gateway
            .send(&msg.conversation_id, OutboundPayload::Sticker { data })
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => Err(CommandError::Delivery {
                reply: texts::STICKER_SEND_FAILED,
                detail: e.to_string(),
            }),
        }
        // `output` is dropped here, removing the transcoded file.
    }

    async fn cmd_save_status(&self, msg: &InboundMessage) -> Result<(), CommandError> {
        let Some(quoted) = msg.quoted.as_deref() else {
            return Err(CommandError::Parse(texts::STATUS_USAGE));
        };
        let (media, kind, emoji) = match quoted {
            MessagePayload::Image { media, .. } => (media, MediaKind::Image, "📸"),
            MessagePayload::Video { media, .. } => (media, MediaKind::Video, "🎬"),
            _ => return Err(CommandError::Parse(texts::STATUS_NO_MEDIA)),
        };
        let buffer = self.download(media, kind, texts::STATUS_FAILED).await?;
        let path = self
            .media
            .save_status(&buffer, &msg.conversation_id, extension_for(kind))
            .await
            .map_err(|e| CommandError::MediaFetch {
                reply: texts::STATUS_FAILED,
                detail: e.to_string(),
            })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let caption = Some(texts::status_caption(emoji, &msg.conversation_id, &filename));
        let payload = match kind {
            MediaKind::Image => OutboundPayload::Image {
                data: buffer,
                caption,
            },
            _ => OutboundPayload::Video {
                data: buffer,
                caption,
            },
        };
        self.gateway
            .send(&self.owner_jid, payload)
            .await
            .map_err(|e| CommandError::Delivery {
                reply: texts::STATUS_FAILED,
                detail: e.to_string(),
            })?;
        if self.notify_requester {
            let ack = self
                .gateway
                .send(&msg.conversation_id, OutboundPayload::text(texts::STATUS_ACK))
                .await;
            if let Err(e) = ack {
                debug!(error = %e, "status ack not delivered");
            }
        }
        Ok(())
    }

    async fn cmd_set_name(&self, msg: &InboundMessage, argument: &str) -> Result<(), CommandError> {
        if argument.is_empty() {
            return Err(CommandError::Parse(texts::SETNAME_USAGE));
        }
        self.gateway
            .update_group_subject(&msg.conversation_id, argument)
            .await
            .map_err(|e| CommandError::Delivery {
                reply: texts::SETNAME_FAILED,
                detail: e.to_string(),
            })?;
        self.reply(msg, texts::SETNAME_OK).await
    }

    async fn cmd_set_desc(&self, msg: &InboundMessage, argument: &str) -> Result<(), CommandError> {
        if argument.is_empty() {
            return Err(CommandError::Parse(texts::SETDESC_USAGE));
        }
        self.gateway
            .update_group_description(&msg.conversation_id, argument)
            .await
            .map_err(|e| CommandError::Delivery {
                reply: texts::SETDESC_FAILED,
                detail: e.to_string(),
            })?;
        self.reply(msg, texts::SETDESC_OK).await
    }

    async fn cmd_kick(&self, msg: &InboundMessage) -> Result<(), CommandError> {
        if msg.mentioned.is_empty() {
            return Err(CommandError::Parse(texts::KICK_USAGE));
        }
        self.gateway
            .remove_participants(&msg.conversation_id, &msg.mentioned)
            .await
            .map_err(|e| CommandError::Delivery {
                reply: texts::KICK_FAILED,
                detail: e.to_string(),
            })?;
        self.reply(msg, texts::KICK_OK).await
    }

    async fn cmd_tag_all(
        &self,
        msg: &InboundMessage,
        metadata: Option<GroupMetadata>,
    ) -> Result<(), CommandError> {
        // Authorization fetched the metadata; its absence is a dispatch bug.
        let metadata = metadata.ok_or_else(|| CommandError::Respond {
            detail: "tagall dispatched without group metadata".to_string(),
        })?;
        let mentions: Vec<String> = metadata
            .participants
            .iter()
            .map(|p| p.id.clone())
            .collect();
        self.send(
            msg,
            OutboundPayload::Text {
                body: texts::TAGALL_TEXT.to_string(),
                mentions,
            },
        )
        .await
    }

    async fn cmd_recover(
        &self,
        msg: &InboundMessage,
        cache: &DeletedMessageCache,
    ) -> Result<(), CommandError> {
        let Some(deleted) = cache.last_deleted(&msg.conversation_id) else {
            return self.reply(msg, texts::RECOVER_NOTHING).await;
        };
        match &deleted.payload {
            MessagePayload::Text { body } => self.reply(msg, texts::recovered_text(body)).await,
            MessagePayload::Image { media, .. } => {
                let data = self
                    .download(media, MediaKind::Image, texts::RECOVER_IMAGE_FAILED)
                    .await?;
                self.send_or(
                    msg,
                    OutboundPayload::Image {
                        data,
                        caption: Some(texts::RECOVER_IMAGE_CAPTION.to_string()),
                    },
                    texts::RECOVER_IMAGE_FAILED,
                )
                .await
            }
            MessagePayload::Video { media, .. } => {
                let data = self
                    .download(media, MediaKind::Video, texts::RECOVER_VIDEO_FAILED)
                    .await?;
                self.send_or(
                    msg,
                    OutboundPayload::Video {
                        data,
                        caption: Some(texts::RECOVER_VIDEO_CAPTION.to_string()),
                    },
                    texts::RECOVER_VIDEO_FAILED,
                )
                .await
            }
            MessagePayload::Document { media, file_name } => {
                let data = self
                    .download(media, MediaKind::Document, texts::RECOVER_DOCUMENT_FAILED)
                    .await?;
                let file_name = file_name.clone().unwrap_or_else(|| {
                    format!("file_{}", chrono::Utc::now().timestamp_millis())
                });
                self.send_or(
                    msg,
                    OutboundPayload::Document {
                        data,
                        file_name,
                        mime_type: media.mime_type.clone(),
                    },
                    texts::RECOVER_DOCUMENT_FAILED,
                )
                .await
            }
            MessagePayload::Audio { media } => {
                let data = self
                    .download(media, MediaKind::Audio, texts::RECOVER_AUDIO_FAILED)
                    .await?;
                self.send_or(
                    msg,
                    OutboundPayload::Audio {
                        data,
                        mime_type: media.mime_type.clone(),
                    },
                    texts::RECOVER_AUDIO_FAILED,
                )
                .await
            }
            MessagePayload::Sticker { media } => {
                let data = self
                    .download(media, MediaKind::Sticker, texts::RECOVER_STICKER_FAILED)
                    .await?;
                self.send_or(
                    msg,
                    OutboundPayload::Sticker { data },
                    texts::RECOVER_STICKER_FAILED,
                )
                .await
            }
        }
    }

    /// Downloads and drains a media descriptor, mapping both the descriptor
    /// resolution and the stream drain onto one failure reply.
    async fn download(
        &self,
        media: &MediaRef,
        kind: MediaKind,
        reply: &'static str,
    ) -> Result<Vec<u8>, CommandError> {
        let stream = self
            .gateway
            .download_content(media, kind)
            .await
            .map_err(|e| CommandError::MediaFetch {
                reply,
                detail: e.to_string(),
            })?;
        fetch_binary(stream)
            .await
            .map_err(|e| CommandError::MediaFetch {
                reply,
                detail: e.to_string(),
            })
    }

    /// Sends a text reply into the message's conversation.
    async fn reply(
        &self,
        msg: &InboundMessage,
        body: impl Into<String>,
    ) -> Result<(), CommandError> {
        self.send(msg, OutboundPayload::text(body)).await
    }

    /// Sends a payload into the message's conversation. A failed send has
    /// no user-visible fallback.
    async fn send(&self, msg: &InboundMessage, payload: OutboundPayload) -> Result<(), CommandError> {
        self.gateway
            .send(&msg.conversation_id, payload)
            .await
            .map_err(|e| CommandError::Respond {
                detail: e.to_string(),
            })
    }

    /// Sends a payload, surfacing a failure notice on delivery errors.
    async fn send_or(
        &self,
        msg: &InboundMessage,
        payload: OutboundPayload,
        reply: &'static str,
    ) -> Result<(), CommandError> {
        self.gateway
            .send(&msg.conversation_id, payload)
            .await
            .map_err(|e| CommandError::Delivery {
                reply,
                detail: e.to_string(),
            })
    }
}
