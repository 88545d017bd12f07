//! Graph API `/messages` request bodies

use crate::state_machine::ListPrompt;
use serde::Serialize;

const MESSAGING_PRODUCT: &str = "whatsapp";
const LIST_SECTION_TITLE: &str = "Options";

#[derive(Debug, Serialize)]
pub struct OutgoingMessage<'a> {
    pub messaging_product: &'static str,
    pub to: &'a str,
    #[serde(flatten)]
    pub body: OutgoingBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutgoingBody<'a> {
    Text { text: TextBody<'a> },
    Interactive { interactive: Interactive<'a> },
}

#[derive(Debug, Serialize)]
pub struct TextBody<'a> {
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Interactive<'a> {
    pub r#type: &'static str,
    pub header: Header<'a>,
    pub body: InteractiveBody<'a>,
    pub action: ListAction<'a>,
}

#[derive(Debug, Serialize)]
pub struct InteractiveBody<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Header<'a> {
    pub r#type: &'static str,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ListAction<'a> {
    pub button: &'a str,
    pub sections: Vec<Section<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Section<'a> {
    pub title: &'static str,
    pub rows: Vec<Row<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Row<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

impl<'a> OutgoingMessage<'a> {
    pub fn text(to: &'a str, body: &'a str) -> Self {
        Self {
            messaging_product: MESSAGING_PRODUCT,
            to,
            body: OutgoingBody::Text {
                text: TextBody { body },
            },
        }
    }

    /// Single-section list, each option used as both row id and title
    pub fn list(to: &'a str, prompt: &'a ListPrompt) -> Self {
        let rows = prompt
            .options
            .iter()
            .map(|option| Row {
                id: option,
                title: option,
            })
            .collect();

        Self {
            messaging_product: MESSAGING_PRODUCT,
            to,
            body: OutgoingBody::Interactive {
                interactive: Interactive {
                    r#type: "list",
                    header: Header {
                        r#type: "text",
                        text: &prompt.header,
                    },
                    body: InteractiveBody { text: &prompt.body },
                    action: ListAction {
                        button: &prompt.button,
                        sections: vec![Section {
                            title: LIST_SECTION_TITLE,
                            rows,
                        }],
                    },
                },
            },
        }
    }
}
