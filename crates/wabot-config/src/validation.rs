// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as digit-only phone numbers and known log levels.

use crate::ConfigError;
use crate::model::WabotConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &WabotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.owner.number.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "owner.number must not be empty".to_string(),
        });
    } else if !config.owner.number.chars().all(|c| c.is_ascii_digit()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "owner.number must contain digits only (no gateway suffix), got `{}`",
                config.owner.number
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {LOG_LEVELS:?}, got `{}`",
                config.agent.log_level
            ),
        });
    }

    if config.media.temp_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "media.temp_dir must not be empty".to_string(),
        });
    }

    if config.media.status_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "media.status_dir must not be empty".to_string(),
        });
    }

    if config.ai.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "ai.model must not be empty".to_string(),
        });
    }

    if config.tiktok.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "tiktok.base_url must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
