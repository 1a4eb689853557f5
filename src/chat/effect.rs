//! Effects produced by session transitions

use super::state::{ChatMessage, ReplyRequest};

/// Effects to be executed after a session transition
#[derive(Debug, Clone)]
pub enum ChatEffect {
    /// Append a message to the transcript
    AppendMessage { message: ChatMessage },

    /// Ask the responder for a reply (spawns as background task)
    RequestReply {
        request_id: String,
        request: ReplyRequest,
    },

    /// Publish a fresh chat snapshot to subscribers
    PublishChat,
}

impl ChatEffect {
    pub fn append(message: ChatMessage) -> Self {
        ChatEffect::AppendMessage { message }
    }
}
