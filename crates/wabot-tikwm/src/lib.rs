// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the tikwm.com short-video download API.
//!
//! One form-encoded POST per `.ttdl` invocation. The API either returns a
//! `data` object with playable URLs or omits it; absence is a defined
//! outcome, not an error.

use serde::Deserialize;
use tracing::debug;

use wabot_config::model::TiktokConfig;
use wabot_core::WabotError;

/// Video URLs returned by the download API.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoData {
    /// HD variant, preferred when present.
    #[serde(default)]
    pub hdplay: Option<String>,
    /// Standard variant.
    #[serde(default)]
    pub play: Option<String>,
}

impl VideoData {
    /// The playable URL, preferring the HD variant.
    pub fn playable_url(&self) -> Option<&str> {
        self.hdplay.as_deref().or(self.play.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Option<VideoData>,
}

/// HTTP client for the short-video download API.
#[derive(Debug, Clone)]
pub struct TikwmClient {
    client: reqwest::Client,
    base_url: String,
}

impl TikwmClient {
    pub fn new(config: &TiktokConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// Looks up the downloadable video behind a source URL.
    ///
    /// `Ok(None)` means the API answered but had no data for the link.
    pub async fn lookup(&self, source_url: &str) -> Result<Option<VideoData>, WabotError> {
        let response = self
            .client
            .post(&self.base_url)
            .form(&[("url", source_url)])
            .send()
            .await
            .map_err(|e| WabotError::Upstream {
                message: format!("video API request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WabotError::Upstream {
                message: format!("video API returned {status}"),
                source: None,
            });
        }

        let parsed: ApiResponse = response.json().await.map_err(|e| WabotError::Upstream {
            message: format!("failed to parse video API response: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(found = parsed.data.is_some(), "video lookup complete");
        Ok(parsed.data)
    }
}
