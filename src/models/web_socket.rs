use serde::{Serialize, Deserialize};

use crate::domain::{DeckView, ErrorKind, Operation};

/// Messages pushed to the page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    Render { html: String, view: DeckView },
    Alert { message: String },
    Error { kind: ErrorKind, operation: Operation, message: String },
}

/// Messages sent by the page, e.g. `{"action": "draw"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientEvent {
    pub action: ClientAction,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClientAction {
    Draw,
    Shuffle,
}
