//! Chat message model
//!
//! Messages are append-only; the typing placeholder is tracked separately by
//! the chat controller and never enters the log.

use crate::repl::services::RequestError;
use serde::Deserialize;
use serde_json::Value;

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One entry in the chat log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// Decoded `/chat` success payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatReply {
    pub reply: Option<String>,
}

impl ChatReply {
    pub fn from_payload(payload: Value) -> Result<Self, RequestError> {
        serde_json::from_value(payload)
            .map_err(|e| RequestError::Malformed(format!("unexpected chat payload: {e}")))
    }

    /// Reply text, or `None` when absent or blank
    pub fn text(&self) -> Option<&str> {
        self.reply.as_deref().filter(|text| !text.trim().is_empty())
    }
}
