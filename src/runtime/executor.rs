//! Chat session executor

use super::traits::Responder;
use super::StorefrontEvent;

use crate::chat::{
    transition, ChatEffect, ChatEvent, ChatSnapshot, ChatState, MessageStamp, Transcript,
};
use crate::responder::UNAVAILABLE_REPLY;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

/// Event plus an optional channel reporting whether it was accepted
#[derive(Debug)]
pub(crate) struct Envelope {
    pub event: ChatEvent,
    pub ack: Option<oneshot::Sender<bool>>,
}

impl Envelope {
    pub fn new(event: ChatEvent) -> Self {
        Self { event, ack: None }
    }

    pub fn with_ack(event: ChatEvent) -> (Self, oneshot::Receiver<bool>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                event,
                ack: Some(tx),
            },
            rx,
        )
    }
}

/// Owns the session state and transcript; the only writer of either
pub struct ChatRuntime<R>
where
    R: Responder + 'static,
{
    state: ChatState,
    transcript: Transcript,
    responder: Arc<R>,
    event_rx: mpsc::Receiver<Envelope>,
    /// Handed to reply tasks so they can report back
    event_tx: mpsc::Sender<Envelope>,
    broadcast_tx: broadcast::Sender<StorefrontEvent>,
    snapshot_tx: watch::Sender<ChatSnapshot>,
}

impl<R> ChatRuntime<R>
where
    R: Responder + 'static,
{
    pub(crate) fn new(
        transcript: Transcript,
        responder: R,
        event_rx: mpsc::Receiver<Envelope>,
        event_tx: mpsc::Sender<Envelope>,
        broadcast_tx: broadcast::Sender<StorefrontEvent>,
        snapshot_tx: watch::Sender<ChatSnapshot>,
    ) -> Self {
        Self {
            state: ChatState::Idle,
            transcript,
            responder: Arc::new(responder),
            event_rx,
            event_tx,
            broadcast_tx,
            snapshot_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(messages = self.transcript.messages().len(), "Starting chat runtime");

        while let Some(envelope) = self.event_rx.recv().await {
            let accepted = self.process_event(envelope.event);
            if let Some(ack) = envelope.ack {
                let _ = ack.send(accepted);
            }
        }

        tracing::info!("Chat runtime stopped");
    }

    fn process_event(&mut self, event: ChatEvent) -> bool {
        let result = match transition(&self.state, &self.transcript, event) {
            Ok(r) => r,
            Err(e) => {
                // Rejected events are dropped without telling the shopper
                tracing::debug!(error = %e, "Ignoring chat event");
                return false;
            }
        };

        self.state = result.new_state;
        for effect in result.effects {
            self.execute_effect(effect);
        }
        true
    }

    fn execute_effect(&mut self, effect: ChatEffect) {
        match effect {
            ChatEffect::AppendMessage { message } => {
                tracing::debug!(
                    sequence = message.sequence,
                    role = ?message.role,
                    "Appending message"
                );
                self.transcript.append(message);
            }

            ChatEffect::PublishChat => {
                let snapshot = ChatSnapshot::new(&self.state, &self.transcript);
                self.snapshot_tx.send_replace(snapshot.clone());
                let _ = self
                    .broadcast_tx
                    .send(StorefrontEvent::Chat { chat: snapshot });
            }

            ChatEffect::RequestReply {
                request_id,
                request,
            } => {
                let responder = self.responder.clone();
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    tracing::info!(
                        request_id = %request_id,
                        history = request.history.len(),
                        "Requesting reply (background)"
                    );

                    // A panicking responder must still release the session
                    let text = match AssertUnwindSafe(responder.respond(&request))
                        .catch_unwind()
                        .await
                    {
                        Ok(text) => text,
                        Err(_) => {
                            tracing::error!(request_id = %request_id, "Responder panicked");
                            UNAVAILABLE_REPLY.to_string()
                        }
                    };
                    let event = ChatEvent::ReplyReady {
                        request_id,
                        text,
                        stamp: MessageStamp::now(),
                    };

                    if event_tx.send(Envelope::new(event)).await.is_err() {
                        tracing::warn!("Chat runtime stopped before the reply arrived");
                    }
                });
            }
        }
    }
}
