//! Runtime for the storefront
//!
//! The chat session runs as a single task that owns its state; the cart is
//! guarded by a mutex inside `Storefront`. Both publish to one broadcast
//! channel that feeds the SSE stream.

mod executor;
mod storefront;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use storefront::Storefront;
pub use traits::*;

use crate::cart::CartSnapshot;
use crate::catalog::ProductId;
use crate::chat::{ChatEvent, ChatSnapshot, ChatState, MessageStamp, ProductContext, Transcript};
use executor::{ChatRuntime, Envelope};
use tokio::sync::{broadcast, mpsc, watch};

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum StorefrontEvent {
    /// Sent once when a client connects
    Init {
        cart: CartSnapshot,
        chat: ChatSnapshot,
    },
    Cart {
        cart: CartSnapshot,
    },
    /// The viewer should retint for a newly selected product
    Scene {
        product_id: ProductId,
        accent_color: String,
    },
    Chat {
        chat: ChatSnapshot,
    },
}

/// Handle to the running chat session
#[derive(Clone)]
pub struct ChatHandle {
    event_tx: mpsc::Sender<Envelope>,
    snapshot_rx: watch::Receiver<ChatSnapshot>,
}

impl ChatHandle {
    /// Submit a shopper message. `Ok(false)` means the session ignored it,
    /// either because it was blank or a reply is still outstanding.
    pub async fn submit(
        &self,
        text: String,
        product: Option<ProductContext>,
    ) -> Result<bool, String> {
        let event = ChatEvent::Submit {
            text,
            product,
            stamp: MessageStamp::now(),
        };
        let (envelope, ack) = Envelope::with_ack(event);

        self.event_tx
            .send(envelope)
            .await
            .map_err(|_| "Chat runtime not running".to_string())?;

        ack.await
            .map_err(|_| "Chat runtime dropped the message".to_string())
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.snapshot_rx.borrow().clone()
    }
}

/// Start a chat session whose transcript opens with `greeting`
pub fn spawn_chat<R>(
    responder: R,
    greeting: &str,
    broadcast_tx: broadcast::Sender<StorefrontEvent>,
) -> ChatHandle
where
    R: Responder + 'static,
{
    let transcript = Transcript::with_greeting(greeting, MessageStamp::now());
    let initial = ChatSnapshot::new(&ChatState::Idle, &transcript);
    let (snapshot_tx, snapshot_rx) = watch::channel(initial);
    let (event_tx, event_rx) = mpsc::channel(32);

    let runtime = ChatRuntime::new(
        transcript,
        responder,
        event_rx,
        event_tx.clone(),
        broadcast_tx,
        snapshot_tx,
    );
    tokio::spawn(runtime.run());

    ChatHandle {
        event_tx,
        snapshot_rx,
    }
}
