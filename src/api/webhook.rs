//! Inbound webhook payloads
//!
//! Only the fields the ordering flow needs are modelled. Anything else the
//! platform sends (statuses, contacts, media) is ignored.

use crate::runtime::InboundMessage;
use crate::state_machine::Event;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
pub struct Change {
    pub value: ChangeValue,
}

#[derive(Debug, Deserialize)]
pub struct ChangeValue {
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub messages: Vec<WebhookMessage>,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    pub phone_number_id: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookMessage {
    pub from: String,
    pub text: Option<TextContent>,
    pub interactive: Option<InteractiveContent>,
}

#[derive(Debug, Deserialize)]
pub struct TextContent {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct InteractiveContent {
    pub list_reply: Option<Reply>,
    pub button_reply: Option<Reply>,
}

#[derive(Debug, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub id: String,
    pub title: String,
}

impl WebhookMessage {
    /// Interactive replies win over text, other message types yield `None`
    fn event(self) -> Option<Event> {
        if let Some(interactive) = self.interactive {
            if let Some(Reply { id, title }) = interactive.list_reply {
                return Some(Event::ListReply { id, title });
            }
            if let Some(Reply { id, title }) = interactive.button_reply {
                return Some(Event::ButtonReply { id, title });
            }
            return None;
        }
        self.text.map(|text| Event::Text { body: text.body })
    }
}

impl WebhookPayload {
    /// Parse a raw delivery. `None` for anything that is not a payload.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// User messages in delivery order
    pub fn into_messages(self) -> Vec<InboundMessage> {
        let mut messages = Vec::new();
        for change in self.entry.into_iter().flat_map(|e| e.changes) {
            let Some(metadata) = change.value.metadata else {
                continue;
            };
            for message in change.value.messages {
                let from = message.from.clone();
                match message.event() {
                    Some(event) => messages.push(InboundMessage::new(
                        from,
                        metadata.phone_number_id.clone(),
                        event,
                    )),
                    None => tracing::debug!(from = %from, "Skipping unsupported message type"),
                }
            }
        }
        messages
    }
}
