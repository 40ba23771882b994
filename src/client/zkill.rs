//! HTTP client for the zKillboard stats API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url, redirect};

use super::{RawStats, ZkillApi};
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};
use crate::stats::EntityRef;

/// HTTP client issuing one GET per stats lookup.
///
/// Timeout and redirect limits come from the config (5 s and 3 by
/// default) so a slow upstream degrades the render instead of stalling it.
pub struct ZkillClient {
    http: HttpClient,
    base_url: Url,
}

impl ZkillClient {
    /// Create a new stats API client
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = Url::parse(&config.api_host)
            .map_err(|e| ConfigError::Invalid(format!("Bad API host: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Build `{host}/api/stats/{typeKey}/{id}/`.
    ///
    /// Segments are pushed through the URL type, so the id is
    /// percent-encoded even though normalized ids are digit-only.
    fn stats_url(&self, entity: &EntityRef) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::Invalid("API host cannot be a base URL".to_string()))?
            .extend([
                "api",
                "stats",
                entity.entity_type.type_key(),
                entity.id.as_str(),
            ])
            // Trailing slash; the API 301s without it
            .push("");
        Ok(url)
    }
}

#[async_trait]
impl ZkillApi for ZkillClient {
    async fn stats(&self, entity: &EntityRef) -> Result<RawStats> {
        let url = self.stats_url(entity)?;
        let response = self.http.get(url).send().await.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status).into());
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        RawStats::from_value(value).ok_or_else(|| {
            ApiError::InvalidResponse("Payload is not a JSON object".to_string()).into()
        })
    }
}
