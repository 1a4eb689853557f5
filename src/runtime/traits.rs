//! Trait abstractions for runtime I/O
//!
//! The chat executor only ever talks to the outside world through these,
//! so it can be driven by mocks in tests.

use crate::chat::ReplyRequest;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces the assistant's reply for one chat request
///
/// Infallible from the session's point of view: implementations turn every
/// failure into displayable text.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, request: &ReplyRequest) -> String;
}

#[async_trait]
impl<T: Responder + ?Sized> Responder for Arc<T> {
    async fn respond(&self, request: &ReplyRequest) -> String {
        (**self).respond(request).await
    }
}
