//! Inbound user input that drives transitions

/// What the user sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Free-text message
    Text { body: String },
    /// Row picked from a list prompt
    ListReply { id: String, title: String },
    /// Quick-reply button pressed
    ButtonReply { id: String, title: String },
}

impl Event {
    #[allow(dead_code)] // Used by tests
    pub fn text(body: impl Into<String>) -> Self {
        Event::Text { body: body.into() }
    }

    #[allow(dead_code)] // Used by tests
    pub fn list_reply(title: impl Into<String>) -> Self {
        let title = title.into();
        Event::ListReply {
            id: title.clone(),
            title,
        }
    }

    /// The selected option the state machine matches against.
    ///
    /// Structured replies keep their title verbatim; free text is trimmed
    /// and lower-cased.
    pub fn selection(&self) -> String {
        match self {
            Event::Text { body } => body.trim().to_lowercase(),
            Event::ListReply { title, .. } | Event::ButtonReply { title, .. } => title.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Event::Text { .. } => "text",
            Event::ListReply { .. } => "list_reply",
            Event::ButtonReply { .. } => "button_reply",
        }
    }
}
