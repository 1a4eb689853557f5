//! HTTP API for the storefront

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::{ChatHandle, Storefront, StorefrontEvent};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<Storefront>,
    pub chat: ChatHandle,
    pub broadcast_tx: broadcast::Sender<StorefrontEvent>,
}

impl AppState {
    pub fn new(
        storefront: Storefront,
        chat: ChatHandle,
        broadcast_tx: broadcast::Sender<StorefrontEvent>,
    ) -> Self {
        Self {
            storefront: Arc::new(storefront),
            chat,
            broadcast_tx,
        }
    }
}
