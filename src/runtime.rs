//! Runtime for processing inbound messages
//!
//! Serializes work per user, runs the state machine and carries out its
//! effects against the session store and the messaging gateway.

mod executor;
mod locks;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::OrderRuntime;
pub use locks::UserLocks;
pub use traits::*;

use crate::state_machine::Event;

/// One user message extracted from a webhook delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Sender, also the reply recipient
    pub user_id: String,
    /// Business number that received the message and sends the reply
    pub channel_id: String,
    pub event: Event,
}

impl InboundMessage {
    pub fn new(user_id: impl Into<String>, channel_id: impl Into<String>, event: Event) -> Self {
        Self {
            user_id: user_id.into(),
            channel_id: channel_id.into(),
            event,
        }
    }
}
