use std::time::Duration;

use crate::AgentError;

#[async_trait::async_trait]
pub trait Navigator: Send + Sync {
    /// Loads a fresh copy of the controlling page, resolving once the load
    /// completes. Resets the page after a finished run.
    async fn reload(&self) -> Result<(), AgentError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestNavigator {
    client: reqwest::Client,
    page_url: String,
}

impl ReqwestNavigator {
    pub fn new(page_url: impl Into<String>) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| AgentError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            page_url: page_url.into(),
        })
    }
}

#[async_trait::async_trait]
impl Navigator for ReqwestNavigator {
    async fn reload(&self) -> Result<(), AgentError> {
        let response = self
            .client
            .get(&self.page_url)
            .send()
            .await
            .map_err(|err| AgentError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
