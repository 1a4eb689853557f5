//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::traits::*;
use crate::chat::ReplyRequest;
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

// ============================================================================
// Mock Responders
// ============================================================================

/// Responder that answers immediately from a queue
pub struct MockResponder {
    replies: Mutex<VecDeque<String>>,
    pub requests: Mutex<Vec<ReplyRequest>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(reply.into());
    }

    pub fn recorded_requests(&self) -> Vec<ReplyRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, request: &ReplyRequest) -> String {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "Mock reply".to_string())
    }
}

/// Responder that holds every reply until `release` is called
pub struct GatedResponder {
    gate: Notify,
    pub requests: Mutex<Vec<ReplyRequest>>,
}

impl GatedResponder {
    pub fn new() -> Self {
        Self {
            gate: Notify::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Let one pending (or the next) reply through
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Responder for GatedResponder {
    async fn respond(&self, request: &ReplyRequest) -> String {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        self.gate.notified().await;
        format!("Gated reply {count}")
    }
}

/// Responder that panics on its first request and answers afterwards
pub struct PanickingResponder {
    calls: Mutex<usize>,
}

impl PanickingResponder {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl Responder for PanickingResponder {
    async fn respond(&self, _request: &ReplyRequest) -> String {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        assert!(call > 1, "responder blew up");
        "Recovered reply".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, ProductId};
    use crate::chat::{ChatSnapshot, Role};
    use crate::responder::UNAVAILABLE_REPLY;
    use crate::runtime::{spawn_chat, ChatHandle, StorefrontEvent};
    use crate::system_prompt::GREETING;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::broadcast;

    fn start<R: Responder + 'static>(
        responder: R,
    ) -> (ChatHandle, broadcast::Receiver<StorefrontEvent>) {
        let (tx, rx) = broadcast::channel(64);
        (spawn_chat(responder, GREETING, tx), rx)
    }

    /// Wait for a chat snapshot matching `pred`
    async fn wait_for_chat(
        rx: &mut broadcast::Receiver<StorefrontEvent>,
        pred: impl Fn(&ChatSnapshot) -> bool,
    ) -> Option<ChatSnapshot> {
        let wait = async {
            loop {
                match rx.recv().await {
                    Ok(StorefrontEvent::Chat { chat }) if pred(&chat) => return Some(chat),
                    Ok(_) => {}
                    Err(_) => return None,
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(2), wait)
            .await
            .ok()
            .flatten()
    }

    #[tokio::test]
    async fn test_mock_llm_service() {
        let mock = MockLlmService::new();
        mock.queue_response(LlmResponse::from_text("Hello"));

        let request = LlmRequest {
            system: None,
            messages: vec![],
            max_tokens: Some(100),
        };

        let response = mock.complete(&request).await.unwrap();
        assert_eq!(response.text, "Hello");

        // Second call should fail (no more responses)
        assert!(mock.complete(&request).await.is_err());
        assert_eq!(mock.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_session_opens_with_greeting() {
        let (chat, _rx) = start(MockResponder::new());
        let snapshot = chat.snapshot();
        assert!(!snapshot.awaiting);
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.messages[0].role, Role::Assistant);
        assert_eq!(snapshot.messages[0].text, GREETING);
    }

    /// Integration test: one full exchange
    #[tokio::test]
    async fn test_submit_and_reply() {
        let responder = Arc::new(MockResponder::new());
        responder.queue_reply("Dark velvet petals over smoky oud.");
        let (chat, mut rx) = start(responder.clone());

        let rose = catalog().get(&ProductId::new("1")).unwrap();
        let accepted = chat
            .submit("What does Midnight Rose smell like?".to_string(), Some(rose.into()))
            .await
            .unwrap();
        assert!(accepted);

        let done = wait_for_chat(&mut rx, |c| !c.awaiting && c.messages.len() == 3)
            .await
            .expect("reply never arrived");
        assert_eq!(done.messages[1].role, Role::User);
        assert_eq!(done.messages[2].role, Role::Assistant);
        assert_eq!(done.messages[2].text, "Dark velvet petals over smoky oud.");

        let requests = responder.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].product.as_ref().unwrap().name, "Midnight Rose");
        assert_eq!(requests[0].history.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_submit_ignored() {
        let responder = Arc::new(MockResponder::new());
        let (chat, _rx) = start(responder.clone());

        assert!(!chat.submit("   ".to_string(), None).await.unwrap());
        assert_eq!(chat.snapshot().messages.len(), 1);
        assert!(responder.recorded_requests().is_empty());
    }

    /// A second message while a reply is outstanding is dropped
    #[tokio::test]
    async fn test_submit_while_awaiting_is_ignored() {
        let responder = Arc::new(GatedResponder::new());
        let (chat, mut rx) = start(responder.clone());

        assert!(chat.submit("First".to_string(), None).await.unwrap());
        assert!(chat.snapshot().awaiting);
        assert!(!chat.submit("Second".to_string(), None).await.unwrap());

        let snapshot = chat.snapshot();
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[1].text, "First");

        responder.release();
        let done = wait_for_chat(&mut rx, |c| !c.awaiting)
            .await
            .expect("reply never arrived");
        assert_eq!(done.messages.len(), 3);
        assert_eq!(done.messages[2].text, "Gated reply 1");
        assert_eq!(responder.request_count(), 1);

        // Accepted again once idle
        assert!(chat.submit("Third".to_string(), None).await.unwrap());
    }

    /// Each request restates everything said before it
    #[tokio::test]
    async fn test_history_grows_across_exchanges() {
        let responder = Arc::new(MockResponder::new());
        let (chat, mut rx) = start(responder.clone());

        for (i, text) in ["Hello", "Tell me about amber"].into_iter().enumerate() {
            assert!(chat.submit(text.to_string(), None).await.unwrap());
            let expected = 3 + i * 2;
            wait_for_chat(&mut rx, |c| !c.awaiting && c.messages.len() == expected)
                .await
                .expect("reply never arrived");
        }

        let requests = responder.recorded_requests();
        assert_eq!(requests[0].history.len(), 1);
        assert_eq!(requests[1].history.len(), 3);
        assert_eq!(requests[1].history[1].text, "Hello");
        assert_eq!(requests[1].user_text, "Tell me about amber");
    }

    /// A responder panic still ends the request with a fallback message
    #[tokio::test]
    async fn test_panicking_responder_releases_session() {
        let (chat, mut rx) = start(PanickingResponder::new());

        assert!(chat.submit("First".to_string(), None).await.unwrap());
        let done = wait_for_chat(&mut rx, |c| !c.awaiting && c.messages.len() == 3)
            .await
            .expect("session stayed awaiting");
        assert_eq!(done.messages[2].role, Role::Assistant);
        assert_eq!(done.messages[2].text, UNAVAILABLE_REPLY);

        assert!(chat.submit("Second".to_string(), None).await.unwrap());
        let done = wait_for_chat(&mut rx, |c| !c.awaiting && c.messages.len() == 5)
            .await
            .expect("reply never arrived");
        assert_eq!(done.messages[4].text, "Recovered reply");
    }
}
