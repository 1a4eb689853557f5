//! Chat session state types

use crate::catalog::{Money, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Identity assigned to a message before it enters the transcript
///
/// Generated by the runtime so that transitions stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStamp {
    pub id: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageStamp {
    pub fn now() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// One transcript entry. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    /// Position in the transcript, starting at 0
    pub sequence: u64,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Role/text pair restated to the responder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Append-only, ordered message log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript opened by an assistant greeting
    pub fn with_greeting(greeting: &str, stamp: MessageStamp) -> Self {
        let mut transcript = Self::new();
        transcript.append(transcript.message(Role::Assistant, greeting.to_string(), stamp));
        transcript
    }

    /// Build the next message in sequence without appending it
    pub fn message(&self, role: Role, text: String, stamp: MessageStamp) -> ChatMessage {
        ChatMessage {
            id: stamp.id,
            sequence: self.next_sequence(),
            role,
            text,
            timestamp: stamp.timestamp,
        }
    }

    pub(crate) fn append(&mut self, message: ChatMessage) {
        debug_assert_eq!(message.sequence, self.next_sequence());
        self.messages.push(message);
    }

    pub fn next_sequence(&self) -> u64 {
        self.messages.len() as u64
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The whole transcript as role/text pairs
    pub fn turns(&self) -> Vec<Turn> {
        self.messages
            .iter()
            .map(|m| Turn {
                role: m.role,
                text: m.text.clone(),
            })
            .collect()
    }
}

/// Session lifecycle. `Awaiting` blocks further submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatState {
    Idle,
    Awaiting {
        /// Id of the user message that opened the request
        request_id: String,
    },
}

impl ChatState {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, ChatState::Awaiting { .. })
    }
}

/// Descriptive fields of the product the shopper is looking at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductContext {
    pub name: String,
    pub price: Money,
    pub notes: String,
    pub description: String,
}

impl From<&Product> for ProductContext {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            notes: product.notes.clone(),
            description: product.description.clone(),
        }
    }
}

/// Everything the responder gets for one reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    /// Transcript before the new user message
    pub history: Vec<Turn>,
    pub product: Option<ProductContext>,
    pub user_text: String,
}

/// Immutable view of the session handed to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSnapshot {
    pub awaiting: bool,
    pub messages: Vec<ChatMessage>,
}

impl ChatSnapshot {
    pub fn new(state: &ChatState, transcript: &Transcript) -> Self {
        Self {
            awaiting: state.is_awaiting(),
            messages: transcript.messages().to_vec(),
        }
    }
}
