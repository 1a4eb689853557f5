//! Pure session transition function
//!
//! Given the same state, transcript and event it always yields the same
//! result; message ids and timestamps arrive inside the event.

use super::state::{ChatState, ReplyRequest, Role, Transcript};
use super::{ChatEffect, ChatEvent};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<ChatEffect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: ChatEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Events the session refuses. The runtime drops these without telling
/// the shopper.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Still waiting for the previous reply")]
    AwaitingReply,
    #[error("Reply {0} does not match an outstanding request")]
    UnexpectedReply(String),
}

pub fn transition(
    state: &ChatState,
    transcript: &Transcript,
    event: ChatEvent,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Idle + Submit -> Awaiting, user message appended right away
        (ChatState::Idle, ChatEvent::Submit { text, product, stamp }) => {
            if text.trim().is_empty() {
                return Err(TransitionError::EmptyMessage);
            }

            let request_id = stamp.id.clone();
            let request = ReplyRequest {
                history: transcript.turns(),
                product,
                user_text: text.clone(),
            };
            let message = transcript.message(Role::User, text, stamp);

            Ok(TransitionResult::new(ChatState::Awaiting {
                request_id: request_id.clone(),
            })
            .with_effect(ChatEffect::append(message))
            .with_effect(ChatEffect::PublishChat)
            .with_effect(ChatEffect::RequestReply {
                request_id,
                request,
            }))
        }

        (ChatState::Awaiting { .. }, ChatEvent::Submit { .. }) => {
            Err(TransitionError::AwaitingReply)
        }

        // Awaiting + matching reply -> Idle
        (
            ChatState::Awaiting { request_id },
            ChatEvent::ReplyReady {
                request_id: reply_id,
                text,
                stamp,
            },
        ) if *request_id == reply_id => {
            let message = transcript.message(Role::Assistant, text, stamp);
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(ChatEffect::append(message))
                .with_effect(ChatEffect::PublishChat))
        }

        (_, ChatEvent::ReplyReady { request_id, .. }) => {
            Err(TransitionError::UnexpectedReply(request_id))
        }
    }
}
