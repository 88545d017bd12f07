//! Mock implementations for testing
//!
//! These mocks enable runtime and API tests without real I/O.

use crate::gateway::{GatewayError, MessagingGateway};
use crate::state_machine::ListPrompt;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// A message the mock gateway was asked to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Text {
        channel_id: String,
        to: String,
        body: String,
    },
    List {
        channel_id: String,
        to: String,
        prompt: ListPrompt,
    },
}

impl SentMessage {
    pub fn to(&self) -> &str {
        match self {
            SentMessage::Text { to, .. } | SentMessage::List { to, .. } => to,
        }
    }

    pub fn text_body(&self) -> Option<&str> {
        match self {
            SentMessage::Text { body, .. } => Some(body),
            SentMessage::List { .. } => None,
        }
    }

    pub fn list_prompt(&self) -> Option<&ListPrompt> {
        match self {
            SentMessage::List { prompt, .. } => Some(prompt),
            SentMessage::Text { .. } => None,
        }
    }
}

/// Mock gateway that records every send
#[derive(Default)]
pub struct MockGateway {
    sent: Mutex<Vec<SentMessage>>,
    /// Every send fails after being recorded
    fail: bool,
    /// Simulated network latency
    delay: Option<Duration>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose sends are recorded and then fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get recorded sends
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Remove and return recorded sends
    pub fn take_sent(&self) -> Vec<SentMessage> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    async fn record(&self, message: SentMessage) -> Result<(), GatewayError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.sent.lock().unwrap().push(message);
        if self.fail {
            Err(GatewayError::from_response(500, "Mock send failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MessagingGateway for MockGateway {
    async fn send_text(&self, channel_id: &str, to: &str, body: &str) -> Result<(), GatewayError> {
        self.record(SentMessage::Text {
            channel_id: channel_id.to_string(),
            to: to.to_string(),
            body: body.to_string(),
        })
        .await
    }

    async fn send_list(
        &self,
        channel_id: &str,
        to: &str,
        prompt: &ListPrompt,
    ) -> Result<(), GatewayError> {
        self.record(SentMessage::List {
            channel_id: channel_id.to_string(),
            to: to.to_string(),
            prompt: prompt.clone(),
        })
        .await
    }
}
