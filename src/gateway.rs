//! Outbound messaging
//!
//! Delivers replies to users through the platform's send API.

mod error;
mod graph;
mod wire;

pub use error::{GatewayError, GatewayErrorKind};
pub use graph::GraphApiGateway;

use crate::state_machine::ListPrompt;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for message delivery
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send a plain text message
    async fn send_text(&self, channel_id: &str, to: &str, body: &str) -> Result<(), GatewayError>;

    /// Send a single-select list prompt
    async fn send_list(
        &self,
        channel_id: &str,
        to: &str,
        prompt: &ListPrompt,
    ) -> Result<(), GatewayError>;
}

#[async_trait]
impl<T: MessagingGateway + ?Sized> MessagingGateway for Arc<T> {
    async fn send_text(&self, channel_id: &str, to: &str, body: &str) -> Result<(), GatewayError> {
        (**self).send_text(channel_id, to, body).await
    }

    async fn send_list(
        &self,
        channel_id: &str,
        to: &str,
        prompt: &ListPrompt,
    ) -> Result<(), GatewayError> {
        (**self).send_list(channel_id, to, prompt).await
    }
}

/// Logging wrapper for gateways
pub struct LoggingGateway {
    inner: Arc<dyn MessagingGateway>,
}

impl LoggingGateway {
    pub fn new(inner: Arc<dyn MessagingGateway>) -> Self {
        Self { inner }
    }

    fn log_result(
        kind: &str,
        channel_id: &str,
        to: &str,
        started: std::time::Instant,
        result: &Result<(), GatewayError>,
    ) {
        let duration = started.elapsed();
        match result {
            Ok(()) => {
                tracing::info!(
                    kind,
                    channel_id = %channel_id,
                    to = %to,
                    duration_ms = %duration.as_millis(),
                    "Message sent"
                );
            }
            Err(e) => {
                tracing::error!(
                    kind,
                    channel_id = %channel_id,
                    to = %to,
                    duration_ms = %duration.as_millis(),
                    status = ?e.status,
                    error_kind = ?e.kind,
                    retryable = e.kind.is_retryable(),
                    error = %e.message,
                    "Message send failed"
                );
            }
        }
    }
}

#[async_trait]
impl MessagingGateway for LoggingGateway {
    async fn send_text(&self, channel_id: &str, to: &str, body: &str) -> Result<(), GatewayError> {
        let started = std::time::Instant::now();
        let result = self.inner.send_text(channel_id, to, body).await;
        Self::log_result("text", channel_id, to, started, &result);
        result
    }

    async fn send_list(
        &self,
        channel_id: &str,
        to: &str,
        prompt: &ListPrompt,
    ) -> Result<(), GatewayError> {
        let started = std::time::Instant::now();
        let result = self.inner.send_list(channel_id, to, prompt).await;
        Self::log_result("list", channel_id, to, started, &result);
        result
    }
}
