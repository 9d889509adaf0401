//! # Beaker Chat
//!
//! The tutor conversation transcript.
//!
//! A model reply that is still streaming is a [`MessageBody::Pending`]
//! message, not an empty string, so a genuinely empty reply stays
//! distinguishable from one that has not produced a fragment yet.
//! Fragments are appended strictly in arrival order; there is no
//! reordering and no retry.

pub mod analogies;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use analogies::{ANALOGIES, Analogy};

/// Unique identifier for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Message content state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "lowercase")]
pub enum MessageBody {
    /// Reply requested, no fragment received yet
    Pending,
    /// Materialized text (possibly still growing)
    Text(String),
}

impl MessageBody {
    /// Displayable text; a pending body renders as nothing
    pub fn text(&self) -> &str {
        match self {
            MessageBody::Pending => "",
            MessageBody::Text(text) => text,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MessageBody::Pending)
    }
}

/// A chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub body: MessageBody,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, body: MessageBody) -> Self {
        Self {
            id: MessageId::new(),
            role,
            body,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered conversation transcript
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append a user message
    pub fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        self.push(Message::new(Role::User, MessageBody::Text(text.into())))
    }

    /// Append a completed model message (e.g. the seeded welcome)
    pub fn push_model(&mut self, text: impl Into<String>) -> MessageId {
        self.push(Message::new(Role::Model, MessageBody::Text(text.into())))
    }

    /// Open a streaming model reply
    pub fn begin_reply(&mut self) -> MessageId {
        self.push(Message::new(Role::Model, MessageBody::Pending))
    }

    /// Apply a received fragment to the in-progress reply.
    ///
    /// The first fragment materializes the pending body; later ones are
    /// appended. A fragment with no reply in progress extends the last
    /// model message (last-writer-wins on the transcript).
    pub fn append_fragment(&mut self, fragment: &str) {
        let Some(message) = self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.role == Role::Model)
        else {
            return;
        };

        match &mut message.body {
            MessageBody::Pending => {
                message.body = MessageBody::Text(fragment.to_string());
            }
            MessageBody::Text(text) => text.push_str(fragment),
        }
    }

    /// Is a streaming reply still unmaterialized?
    pub fn awaiting_reply(&self) -> bool {
        self.last().is_some_and(|m| m.body.is_pending())
    }

    fn push(&mut self, message: Message) -> MessageId {
        let id = message.id;
        self.messages.push(message);
        id
    }
}
