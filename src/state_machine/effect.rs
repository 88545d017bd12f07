//! Effects produced by state transitions

/// Single-select list message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPrompt {
    pub header: String,
    pub body: String,
    /// Label of the button that opens the list
    pub button: String,
    pub options: Vec<String>,
}

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a plain text reply
    SendText { body: String },

    /// Send a list prompt
    SendList(ListPrompt),

    /// Store the new state for the user
    PersistState,

    /// Delete the user's session, the order flow is over
    EndSession,
}

impl Effect {
    pub fn send_text(body: impl Into<String>) -> Self {
        Effect::SendText { body: body.into() }
    }

    pub fn send_list(
        header: impl Into<String>,
        body: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Effect::SendList(ListPrompt {
            header: header.into(),
            body: body.into(),
            button: "Select".to_string(),
            options,
        })
    }

    /// True for effects that reach the user
    #[allow(dead_code)] // Used by tests
    pub fn is_reply(&self) -> bool {
        matches!(self, Effect::SendText { .. } | Effect::SendList(_))
    }
}
