//! Conversation-related types.
//!
//! Histories arrive from clients and are not trusted: they may start with
//! any role, be empty, or carry roles the completion endpoints don't know.
//! [`normalize`] turns such a history into a prompt the conversational
//! endpoint always accepts.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize, Serializer};
use wayfarer_model::ModelMessage;

use crate::instruction::Instruction;

/// The author of a chat message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    /// Instructions for the model.
    System,
    /// The traveler.
    User,
    /// The travel assistant.
    Assistant,
    /// Any role a client made up. Never forwarded to a model.
    Other(String),
}

impl Role {
    /// Returns the wire name of the role.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        match name.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(name),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn of a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
}

impl ChatMessage {
    /// Creates a message with the given role.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    #[inline]
    pub fn role(&self) -> &Role {
        &self.role
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    fn is_dialogue(&self) -> bool {
        matches!(self.role, Role::User | Role::Assistant)
    }
}

/// A prompt that starts with the system instruction, continues with the
/// dialogue (starting with a user turn) and ends with the new user
/// message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedPrompt(Vec<ModelMessage>);

impl NormalizedPrompt {
    #[inline]
    pub fn messages(&self) -> &[ModelMessage] {
        &self.0
    }

    #[inline]
    pub fn into_messages(self) -> Vec<ModelMessage> {
        self.0
    }
}

/// Builds the conversational prompt for a new user message.
///
/// Turns that are neither user nor assistant are discarded, and so is
/// everything before the first user turn. The new message is always
/// appended last, whatever the history ends with.
pub fn normalize(history: &[ChatMessage], message: &str) -> NormalizedPrompt {
    let retained = history
        .iter()
        .filter(|msg| msg.is_dialogue())
        .skip_while(|msg| msg.role != Role::User);

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ModelMessage::System(
        Instruction::Conversation.text().to_owned(),
    ));
    messages.extend(retained.map(|msg| match msg.role {
        Role::User => ModelMessage::User(msg.content.clone()),
        _ => ModelMessage::Assistant(msg.content.clone()),
    }));
    messages.push(ModelMessage::User(message.to_owned()));

    NormalizedPrompt(messages)
}

/// Renders the dialogue as `User:` / `Assistant:` labeled lines.
pub fn transcript(history: &[ChatMessage]) -> String {
    history
        .iter()
        .filter_map(|msg| {
            let label = match msg.role {
                Role::User => "User",
                Role::Assistant => "Assistant",
                _ => return None,
            };
            Some(format!("{label}: {}", msg.content))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
