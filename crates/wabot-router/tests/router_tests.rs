// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end router tests against the mock gateway.

use std::sync::Arc;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wabot_cache::DeletedMessageCache;
use wabot_config::WabotConfig;
use wabot_config::model::{AgentConfig, AiConfig, MediaConfig, OwnerConfig, TiktokConfig};
use wabot_core::{
    ContentDescriptor, GroupMetadata, InboundMessage, MediaRef, MessagePayload, OutboundPayload,
    Participant, ParticipantRole,
};
use wabot_router::{Router, texts};
use wabot_test_utils::{GroupMutation, MockGateway};

const GROUP: &str = "12036304@g.us";
const DM: &str = "628111@s.whatsapp.net";
const ADMIN: &str = "628222@s.whatsapp.net";
const MEMBER: &str = "628333@s.whatsapp.net";
const OWNER_NUMBER: &str = "6285122173013";
const OWNER_JID: &str = "6285122173013@s.whatsapp.net";

fn config(dir: &TempDir) -> WabotConfig {
    WabotConfig {
        agent: AgentConfig {
            name: "Wabot-X AI".into(),
            log_level: "info".into(),
        },
        owner: OwnerConfig {
            number: OWNER_NUMBER.into(),
            name: "Jogab Gebi".into(),
        },
        media: MediaConfig {
            temp_dir: dir.path().join("temp_sticker").display().to_string(),
            status_dir: dir.path().join("statuses").display().to_string(),
            notify_requester: true,
        },
        ai: AiConfig {
            api_key: None,
            model: "gpt-4o-mini".into(),
            base_url: "http://127.0.0.1:9/v1/chat/completions".into(),
        },
        tiktok: TiktokConfig {
            base_url: "http://127.0.0.1:9/api/".into(),
        },
    }
}

fn router(gateway: Arc<MockGateway>, config: &WabotConfig) -> Router {
    Router::new(gateway, config)
}

fn text_message(conversation: &str, sender: &str, body: &str) -> InboundMessage {
    InboundMessage {
        id: "MSG1".into(),
        conversation_id: conversation.into(),
        sender_id: sender.into(),
        from_self: false,
        payload: MessagePayload::Text { body: body.into() },
        mentioned: Vec::new(),
        quoted: None,
        received_at: 1,
    }
}

fn media_ref(descriptor: &str, mime: &str) -> MediaRef {
    MediaRef {
        descriptor: ContentDescriptor(descriptor.into()),
        mime_type: mime.into(),
    }
}

async fn script_group(gateway: &MockGateway) {
    gateway
        .set_group_metadata(
            GROUP,
            GroupMetadata {
                subject: "Grup Tes".into(),
                participants: vec![
                    Participant {
                        id: ADMIN.into(),
                        role: ParticipantRole::Admin,
                    },
                    Participant {
                        id: MEMBER.into(),
                        role: ParticipantRole::Member,
                    },
                ],
            },
        )
        .await;
}

#[tokio::test]
async fn menu_token_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router
        .handle(&text_message(DM, DM, ".Menu"), &cache)
        .await;

    let texts_sent = gateway.texts_sent_to(DM).await;
    assert_eq!(texts_sent.len(), 1);
    assert!(texts_sent[0].contains("MENU BOT"));
}

#[tokio::test]
async fn non_command_and_unknown_tokens_are_ignored() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(DM, DM, "halo bot"), &cache).await;
    router.handle(&text_message(DM, DM, ".nonexistent"), &cache).await;
    router.handle(&text_message(DM, DM, ""), &cache).await;

    assert!(gateway.sent().await.is_empty());
}

#[tokio::test]
async fn self_messages_are_never_dispatched() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    let mut msg = text_message(DM, DM, ".menu");
    msg.from_self = true;
    router.handle(&msg, &cache).await;

    assert!(gateway.sent().await.is_empty());
}

#[tokio::test]
async fn owner_card_names_the_configured_owner() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(DM, DM, ".owner"), &cache).await;

    let texts_sent = gateway.texts_sent_to(DM).await;
    assert_eq!(texts_sent.len(), 1);
    assert!(texts_sent[0].contains("Jogab Gebi"));
    assert!(texts_sent[0].contains("wa.me/6285122173013"));
}

#[tokio::test]
async fn runtime_and_uptime_render_the_same_card() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(DM, DM, ".runtime"), &cache).await;
    router.handle(&text_message(DM, DM, ".uptime"), &cache).await;

    let texts_sent = gateway.texts_sent_to(DM).await;
    assert_eq!(texts_sent.len(), 2);
    for card in &texts_sent {
        assert!(card.contains("BOT RUNTIME"));
        assert!(card.contains("Jam"));
        assert!(card.contains("Active since"));
    }
}

#[tokio::test]
async fn ai_without_argument_sends_usage_and_nothing_else() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(DM, DM, ".ai"), &cache).await;

    assert_eq!(gateway.texts_sent_to(DM).await, vec![texts::AI_USAGE]);
}

#[tokio::test]
async fn ai_unconfigured_fails_after_thinking_notice() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    // api_key is None, so the AI client never comes up.
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router
        .handle(&text_message(DM, DM, ".ai apa kabar?"), &cache)
        .await;

    assert_eq!(
        gateway.texts_sent_to(DM).await,
        vec![texts::AI_THINKING, texts::AI_FAILED]
    );
}

#[tokio::test]
async fn ai_answer_is_relayed_to_the_conversation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Lubang hitam adalah..." } }
            ]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir);
    cfg.ai.api_key = Some("test-key".into());
    cfg.ai.base_url = format!("{}/v1/chat/completions", server.uri());

    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &cfg);
    let cache = DeletedMessageCache::new();

    router
        .handle(&text_message(DM, DM, ".ai apa itu black hole?"), &cache)
        .await;

    assert_eq!(
        gateway.texts_sent_to(DM).await,
        vec![texts::AI_THINKING, "Lubang hitam adalah..."]
    );
}

#[tokio::test]
async fn ttdl_without_link_sends_usage() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(DM, DM, ".ttdl"), &cache).await;

    assert_eq!(gateway.texts_sent_to(DM).await, vec![texts::TTDL_USAGE]);
}

#[tokio::test]
async fn ttdl_sends_video_url_with_caption() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "hdplay": "https://cdn.example/video_hd.mp4", "play": "https://cdn.example/video.mp4" }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir);
    cfg.tiktok.base_url = format!("{}/api/", server.uri());

    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &cfg);
    let cache = DeletedMessageCache::new();

    router
        .handle(
            &text_message(DM, DM, ".ttdl https://vt.tiktok.com/xyz"),
            &cache,
        )
        .await;

    let sent = gateway.sent_to(DM).await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], OutboundPayload::text(texts::TTDL_PROCESSING));
    match &sent[1] {
        OutboundPayload::VideoUrl { url, caption } => {
            assert_eq!(url, "https://cdn.example/video_hd.mp4");
            assert_eq!(caption.as_deref(), Some(texts::TTDL_CAPTION));
        }
        other => panic!("expected VideoUrl, got {other:?}"),
    }
}

#[tokio::test]
async fn ttdl_reports_missing_video_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": -1, "msg": "url invalid"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir);
    cfg.tiktok.base_url = format!("{}/api/", server.uri());

    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &cfg);
    let cache = DeletedMessageCache::new();

    router
        .handle(&text_message(DM, DM, ".ttdl https://bad.link"), &cache)
        .await;

    assert_eq!(
        gateway.texts_sent_to(DM).await,
        vec![texts::TTDL_PROCESSING, texts::TTDL_NO_DATA]
    );
}

#[tokio::test]
async fn sticker_without_media_sends_usage_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &cfg);
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(DM, DM, ".sticker"), &cache).await;

    assert_eq!(gateway.texts_sent_to(DM).await, vec![texts::STICKER_USAGE]);
    // The temp directory is created lazily; no media was fetched, so
    // nothing may exist there.
    assert!(!dir.path().join("temp_sticker").exists());
}

#[tokio::test]
async fn group_command_in_direct_chat_is_refused() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router
        .handle(&text_message(DM, DM, ".setname Nama Baru"), &cache)
        .await;

    assert_eq!(gateway.texts_sent_to(DM).await, vec![texts::GROUP_ONLY]);
    assert!(gateway.mutations().await.is_empty());
}

#[tokio::test]
async fn setname_by_non_admin_is_refused_without_mutation() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    script_group(&gateway).await;
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router
        .handle(&text_message(GROUP, MEMBER, ".setname Nama Baru"), &cache)
        .await;

    assert_eq!(
        gateway.texts_sent_to(GROUP).await,
        vec![texts::SETNAME_ADMIN_ONLY]
    );
    assert!(gateway.mutations().await.is_empty());
}

#[tokio::test]
async fn setname_by_admin_updates_subject() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    script_group(&gateway).await;
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router
        .handle(&text_message(GROUP, ADMIN, ".setname Grup Baru"), &cache)
        .await;

    assert_eq!(
        gateway.mutations().await,
        vec![GroupMutation::Subject {
            group_id: GROUP.into(),
            subject: "Grup Baru".into(),
        }]
    );
    assert_eq!(gateway.texts_sent_to(GROUP).await, vec![texts::SETNAME_OK]);
}

#[tokio::test]
async fn setname_without_argument_sends_usage() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    script_group(&gateway).await;
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router
        .handle(&text_message(GROUP, ADMIN, ".setname"), &cache)
        .await;

    assert_eq!(gateway.texts_sent_to(GROUP).await, vec![texts::SETNAME_USAGE]);
    assert!(gateway.mutations().await.is_empty());
}

#[tokio::test]
async fn setdesc_by_admin_updates_description() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    script_group(&gateway).await;
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router
        .handle(
            &text_message(GROUP, ADMIN, ".setdesc Deskripsi baru grup"),
            &cache,
        )
        .await;

    assert_eq!(
        gateway.mutations().await,
        vec![GroupMutation::Description {
            group_id: GROUP.into(),
            description: "Deskripsi baru grup".into(),
        }]
    );
    assert_eq!(gateway.texts_sent_to(GROUP).await, vec![texts::SETDESC_OK]);
}

#[tokio::test]
async fn kick_requires_mentions() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    script_group(&gateway).await;
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(GROUP, ADMIN, ".kick"), &cache).await;

    assert_eq!(gateway.texts_sent_to(GROUP).await, vec![texts::KICK_USAGE]);
    assert!(gateway.mutations().await.is_empty());
}

#[tokio::test]
async fn kick_by_admin_removes_mentioned_members() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    script_group(&gateway).await;
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    let mut msg = text_message(GROUP, ADMIN, ".kick @member");
    msg.mentioned = vec![MEMBER.into()];
    router.handle(&msg, &cache).await;

    assert_eq!(
        gateway.mutations().await,
        vec![GroupMutation::Removed {
            group_id: GROUP.into(),
            participants: vec![MEMBER.into()],
        }]
    );
    assert_eq!(gateway.texts_sent_to(GROUP).await, vec![texts::KICK_OK]);
}

#[tokio::test]
async fn kick_by_non_admin_never_mutates() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    script_group(&gateway).await;
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    let mut msg = text_message(GROUP, MEMBER, ".kick @admin");
    msg.mentioned = vec![ADMIN.into()];
    router.handle(&msg, &cache).await;

    assert_eq!(
        gateway.texts_sent_to(GROUP).await,
        vec![texts::KICK_ADMIN_ONLY]
    );
    assert!(gateway.mutations().await.is_empty());
}

#[tokio::test]
async fn tagall_mentions_every_participant() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    script_group(&gateway).await;
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(GROUP, ADMIN, ".tagall"), &cache).await;

    let sent = gateway.sent_to(GROUP).await;
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        OutboundPayload::Text { body, mentions } => {
            assert_eq!(body, texts::TAGALL_TEXT);
            assert_eq!(mentions, &vec![ADMIN.to_string(), MEMBER.to_string()]);
        }
        other => panic!("expected Text, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_group_metadata_stays_silent() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    // No metadata scripted for the group.
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router
        .handle(&text_message(GROUP, ADMIN, ".tagall"), &cache)
        .await;

    assert!(gateway.sent().await.is_empty());
}

#[tokio::test]
async fn recover_with_empty_cache_reports_nothing_to_restore() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(DM, DM, ".k"), &cache).await;

    assert_eq!(gateway.texts_sent_to(DM).await, vec![texts::RECOVER_NOTHING]);
}

#[tokio::test]
async fn recover_resends_deleted_text() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let mut cache = DeletedMessageCache::new();

    let mut deleted = text_message(DM, DM, "pesan rahasia");
    deleted.id = "DEL1".into();
    cache.put(deleted);
    cache.record_deletion(DM, "DEL1");

    router.handle(&text_message(DM, DM, ".k"), &cache).await;

    assert_eq!(
        gateway.texts_sent_to(DM).await,
        vec![texts::recovered_text("pesan rahasia")]
    );
}

#[tokio::test]
async fn recover_refetches_and_resends_deleted_image() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    gateway.set_media_content("img-desc", b"jpegbytes".to_vec()).await;
    let router = router(gateway.clone(), &config(&dir));
    let mut cache = DeletedMessageCache::new();

    let mut deleted = text_message(DM, DM, "");
    deleted.id = "DEL2".into();
    deleted.payload = MessagePayload::Image {
        media: media_ref("img-desc", "image/jpeg"),
        caption: None,
    };
    cache.put(deleted);
    cache.record_deletion(DM, "DEL2");

    router.handle(&text_message(DM, DM, ".k"), &cache).await;

    let sent = gateway.sent_to(DM).await;
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        OutboundPayload::Image { data, caption } => {
            assert_eq!(data, b"jpegbytes");
            assert_eq!(caption.as_deref(), Some(texts::RECOVER_IMAGE_CAPTION));
        }
        other => panic!("expected Image, got {other:?}"),
    }
}

#[tokio::test]
async fn recover_expired_descriptor_reports_failure() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    // No media scripted, so the descriptor lookup fails.
    let router = router(gateway.clone(), &config(&dir));
    let mut cache = DeletedMessageCache::new();

    let mut deleted = text_message(DM, DM, "");
    deleted.id = "DEL3".into();
    deleted.payload = MessagePayload::Image {
        media: media_ref("gone-desc", "image/jpeg"),
        caption: None,
    };
    cache.put(deleted);
    cache.record_deletion(DM, "DEL3");

    router.handle(&text_message(DM, DM, ".k"), &cache).await;

    assert_eq!(
        gateway.texts_sent_to(DM).await,
        vec![texts::RECOVER_IMAGE_FAILED]
    );
}

#[tokio::test]
async fn save_status_requires_a_quoted_message() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    router.handle(&text_message(DM, DM, ".s"), &cache).await;

    assert_eq!(gateway.texts_sent_to(DM).await, vec![texts::STATUS_USAGE]);
}

#[tokio::test]
async fn save_status_rejects_quoted_text() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    let mut msg = text_message(DM, DM, ".s");
    msg.quoted = Some(Box::new(MessagePayload::Text {
        body: "bukan media".into(),
    }));
    router.handle(&msg, &cache).await;

    assert_eq!(gateway.texts_sent_to(DM).await, vec![texts::STATUS_NO_MEDIA]);
}

#[tokio::test]
async fn save_status_persists_and_forwards_to_owner() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);
    let gateway = MockGateway::new();
    gateway
        .set_media_content("status-desc", b"statusbytes".to_vec())
        .await;
    let router = router(gateway.clone(), &cfg);
    let cache = DeletedMessageCache::new();

    let mut msg = text_message(DM, DM, ".s");
    msg.quoted = Some(Box::new(MessagePayload::Image {
        media: media_ref("status-desc", "image/jpeg"),
        caption: None,
    }));
    router.handle(&msg, &cache).await;

    // The file landed in the status directory.
    let status_dir = dir.path().join("statuses");
    let entries: Vec<_> = std::fs::read_dir(&status_dir)
        .unwrap()
        .map(|e| e.unwrap())
        .collect();
    assert_eq!(entries.len(), 1);
    let filename = entries[0].file_name().to_string_lossy().into_owned();
    assert!(filename.ends_with(".jpg"));
    assert_eq!(std::fs::read(entries[0].path()).unwrap(), b"statusbytes");

    // The owner got the media with the provenance caption.
    let to_owner = gateway.sent_to(OWNER_JID).await;
    assert_eq!(to_owner.len(), 1);
    match &to_owner[0] {
        OutboundPayload::Image { data, caption } => {
            assert_eq!(data, b"statusbytes");
            let caption = caption.as_deref().unwrap();
            assert!(caption.contains(DM));
            assert!(caption.contains(&filename));
        }
        other => panic!("expected Image, got {other:?}"),
    }

    // The requester got the delivery acknowledgement.
    assert_eq!(gateway.texts_sent_to(DM).await, vec![texts::STATUS_ACK]);
}

#[tokio::test]
async fn save_status_download_failure_reports_once() {
    let dir = TempDir::new().unwrap();
    let gateway = MockGateway::new();
    gateway.fail_downloads();
    let router = router(gateway.clone(), &config(&dir));
    let cache = DeletedMessageCache::new();

    let mut msg = text_message(DM, DM, ".s");
    msg.quoted = Some(Box::new(MessagePayload::Video {
        media: media_ref("status-desc", "video/mp4"),
        caption: None,
    }));
    router.handle(&msg, &cache).await;

    assert_eq!(gateway.texts_sent_to(DM).await, vec![texts::STATUS_FAILED]);
    assert!(gateway.sent_to(OWNER_JID).await.is_empty());
}
