//! WhatsApp Cloud API (Graph API) gateway

use super::wire::OutgoingMessage;
use super::{GatewayError, GatewayErrorKind, MessagingGateway};
use crate::config::BotConfig;
use crate::state_machine::ListPrompt;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Sends messages through `POST /{version}/{phone_number_id}/messages`
pub struct GraphApiGateway {
    client: Client,
    token: String,
    base_url: String,
    api_version: String,
}

impl GraphApiGateway {
    pub fn new(
        token: impl Into<String>,
        base_url: &str,
        api_version: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                GatewayError::new(
                    GatewayErrorKind::Unknown,
                    format!("Failed to create HTTP client: {e}"),
                )
            })?;

        Ok(Self {
            client,
            token: token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.into(),
        })
    }

    pub fn from_config(config: &BotConfig) -> Result<Self, GatewayError> {
        Self::new(
            config.graph_api_token.clone(),
            &config.graph_api_base_url,
            config.graph_api_version.clone(),
        )
    }

    fn messages_url(&self, channel_id: &str) -> String {
        format!("{}/{}/{}/messages", self.base_url, self.api_version, channel_id)
    }

    async fn post(
        &self,
        channel_id: &str,
        message: &OutgoingMessage<'_>,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.messages_url(channel_id))
            .bearer_auth(&self.token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::from_response(status.as_u16(), &body))
    }
}

#[async_trait]
impl MessagingGateway for GraphApiGateway {
    async fn send_text(&self, channel_id: &str, to: &str, body: &str) -> Result<(), GatewayError> {
        self.post(channel_id, &OutgoingMessage::text(to, body)).await
    }

    async fn send_list(
        &self,
        channel_id: &str,
        to: &str,
        prompt: &ListPrompt,
    ) -> Result<(), GatewayError> {
        self.post(channel_id, &OutgoingMessage::list(to, prompt)).await
    }
}
