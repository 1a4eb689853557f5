//! Sommelier responder
//!
//! Turns a chat reply request into a display string. Every failure is
//! converted into one of the fixed sentences below; the chat session never
//! sees an error.

use crate::chat::{ReplyRequest, Role};
use crate::llm::{LlmMessage, LlmRequest, LlmService};
use crate::runtime::Responder;
use crate::system_prompt::build_system_prompt;
use async_trait::async_trait;
use std::sync::Arc;

pub const MISSING_CREDENTIALS_REPLY: &str =
    "I'm sorry, I can't connect to my olfactory sensors right now (Missing API Key).";
pub const EMPTY_REPLY: &str = "The scent trail has faded. I could not generate a response.";
pub const UNAVAILABLE_REPLY: &str =
    "My connection to the fragrance database is momentarily interrupted.";

/// Responder backed by the hosted model, when one is configured
pub struct SommelierResponder {
    llm: Option<Arc<dyn LlmService>>,
}

impl SommelierResponder {
    /// `None` answers every request with the missing-credentials sentence
    pub fn new(llm: Option<Arc<dyn LlmService>>) -> Self {
        Self { llm }
    }
}

/// Prior transcript plus the new user text, in provider terms
pub fn build_llm_request(request: &ReplyRequest) -> LlmRequest {
    let mut messages: Vec<LlmMessage> = request
        .history
        .iter()
        .map(|turn| match turn.role {
            Role::User => LlmMessage::user(turn.text.clone()),
            Role::Assistant => LlmMessage::assistant(turn.text.clone()),
        })
        .collect();
    messages.push(LlmMessage::user(request.user_text.clone()));

    LlmRequest {
        system: Some(build_system_prompt(request.product.as_ref())),
        messages,
        max_tokens: None,
    }
}

#[async_trait]
impl Responder for SommelierResponder {
    async fn respond(&self, request: &ReplyRequest) -> String {
        let Some(llm) = &self.llm else {
            return MISSING_CREDENTIALS_REPLY.to_string();
        };

        match llm.complete(&build_llm_request(request)).await {
            Ok(response) if response.is_blank() => EMPTY_REPLY.to_string(),
            Ok(response) => response.text,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    kind = ?e.kind,
                    "Sommelier reply failed, using fallback"
                );
                UNAVAILABLE_REPLY.to_string()
            }
        }
    }
}
