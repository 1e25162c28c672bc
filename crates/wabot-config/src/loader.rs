// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./wabot.toml` > `~/.config/wabot/wabot.toml` >
//! `/etc/wabot/wabot.toml` with environment variable overrides via the
//! `WABOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::WabotConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/wabot/wabot.toml` (system-wide)
/// 3. `~/.config/wabot/wabot.toml` (user XDG config)
/// 4. `./wabot.toml` (local directory)
/// 5. `WABOT_*` environment variables
pub fn load_config() -> Result<WabotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WabotConfig::default()))
        .merge(Toml::file("/etc/wabot/wabot.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("wabot/wabot.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("wabot.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config file specification.
pub fn load_config_from_str(toml_content: &str) -> Result<WabotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WabotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WabotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WabotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `WABOT_MEDIA_STATUS_DIR` must map to
/// `media.status_dir`, not `media.status.dir`.
fn env_provider() -> Env {
    Env::prefixed("WABOT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: WABOT_MEDIA_NOTIFY_REQUESTER -> "media_notify_requester"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("owner_", "owner.", 1)
            .replacen("media_", "media.", 1)
            .replacen("ai_", "ai.", 1)
            .replacen("tiktok_", "tiktok.", 1);
        mapped.into()
    })
}
