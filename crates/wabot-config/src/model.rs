// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Wabot agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Wabot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WabotConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Bot owner identity.
    #[serde(default)]
    pub owner: OwnerConfig,

    /// Media pipeline directories and behavior.
    #[serde(default)]
    pub media: MediaConfig,

    /// AI completion endpoint settings.
    #[serde(default)]
    pub ai: AiConfig,

    /// Short-video download API settings.
    #[serde(default)]
    pub tiktok: TiktokConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "Wabot-X AI".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Bot owner identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OwnerConfig {
    /// Owner phone number, digits only (no gateway suffix).
    #[serde(default = "default_owner_number")]
    pub number: String,

    /// Owner display name shown by the `.owner` command.
    #[serde(default = "default_owner_name")]
    pub name: String,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            number: default_owner_number(),
            name: default_owner_name(),
        }
    }
}

fn default_owner_number() -> String {
    "6285122173013".to_string()
}

fn default_owner_name() -> String {
    "Jogab Gebi".to_string()
}

impl OwnerConfig {
    /// The owner's full gateway identifier.
    pub fn jid(&self) -> String {
        format!("{}@s.whatsapp.net", self.number)
    }
}

/// Media pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// Scoped temporary-media directory for sticker transcoding.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,

    /// Durable directory for downloaded statuses.
    #[serde(default = "default_status_dir")]
    pub status_dir: String,

    /// Whether `.s` acknowledges the requester after forwarding a status
    /// to the owner.
    #[serde(default = "default_notify_requester")]
    pub notify_requester: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
            status_dir: default_status_dir(),
            notify_requester: default_notify_requester(),
        }
    }
}

fn default_temp_dir() -> String {
    "temp_sticker".to_string()
}

fn default_status_dir() -> String {
    "statuses".to_string()
}

fn default_notify_requester() -> bool {
    true
}

/// AI completion endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AiConfig {
    /// API key for the completion endpoint. `None` disables the `.ai` command.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier sent with every completion request.
    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Endpoint base URL.
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_ai_model(),
            base_url: default_ai_base_url(),
        }
    }
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_ai_base_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

/// Short-video download API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TiktokConfig {
    /// Download API endpoint.
    #[serde(default = "default_tiktok_base_url")]
    pub base_url: String,
}

impl Default for TiktokConfig {
    fn default() -> Self {
        Self {
            base_url: default_tiktok_base_url(),
        }
    }
}

fn default_tiktok_base_url() -> String {
    "https://www.tikwm.com/api/".to_string()
}
