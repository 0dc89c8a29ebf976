use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use crate::{AgentError, BrickRequest};

/// Connection settings for the parts cross-reference service.
#[derive(Debug, Clone)]
pub struct XrefSettings {
    /// Base URL of the service, e.g. `https://rebrickable.com`.
    pub base_url: String,
    /// API key sent as `authorization: key <k>`.
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for XrefSettings {
    fn default() -> Self {
        Self {
            base_url: "https://rebrickable.com".to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct XrefResponse {
    elements: Vec<String>,
}

#[async_trait::async_trait]
pub trait AlternativeFinder: Send + Sync {
    /// One substitute request per catalog element id mapped to the part
    /// number/color pair, excluding the original's own id. Stateless; any
    /// failure yields an empty list rather than an error.
    async fn find_alternatives(&self, brick: &BrickRequest) -> Vec<BrickRequest>;
}

#[derive(Debug, Clone)]
pub struct RebrickableFinder {
    client: reqwest::Client,
    settings: XrefSettings,
}

impl RebrickableFinder {
    pub fn new(settings: XrefSettings) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| AgentError::Transport(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn part_colors_url(&self, brick: &BrickRequest) -> String {
        format!(
            "{}/api/v3/lego/parts/{}/colors/{}/",
            self.settings.base_url.trim_end_matches('/'),
            brick.part_number,
            brick.color_id
        )
    }
}

#[async_trait::async_trait]
impl AlternativeFinder for RebrickableFinder {
    async fn find_alternatives(&self, brick: &BrickRequest) -> Vec<BrickRequest> {
        let response = self
            .client
            .get(self.part_colors_url(brick))
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("key {}", self.settings.api_key))
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                log::debug!(
                    "cross-reference lookup for part {} color {} returned status {}",
                    brick.part_number,
                    brick.color_id,
                    response.status()
                );
                return Vec::new();
            }
            Err(err) => {
                log::warn!(
                    "cross-reference lookup failed for part {}: {err}",
                    brick.part_number
                );
                return Vec::new();
            }
        };

        let parsed: XrefResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!(
                    "malformed cross-reference response for part {}: {err}",
                    brick.part_number
                );
                return Vec::new();
            }
        };

        parsed
            .elements
            .into_iter()
            .filter(|element| brick.element_id.as_deref() != Some(element.as_str()))
            .map(|element| BrickRequest {
                element_id: Some(element),
                ..brick.clone()
            })
            .collect()
    }
}
