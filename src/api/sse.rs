//! Server-Sent Events support

use crate::runtime::StorefrontEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Convert broadcast stream to SSE stream
pub fn sse_stream(
    init_event: StorefrontEvent,
    broadcast_rx: tokio::sync::broadcast::Receiver<StorefrontEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move { Ok(to_axum_event(init_event)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(to_axum_event(event))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn to_axum_event(event: StorefrontEvent) -> Event {
    let (event_type, data) = event_payload(event);
    Event::default().event(event_type).data(data.to_string())
}

pub(crate) fn event_payload(event: StorefrontEvent) -> (&'static str, serde_json::Value) {
    match event {
        StorefrontEvent::Init { cart, chat } => (
            "init",
            json!({
                "type": "init",
                "cart": cart,
                "chat": chat
            }),
        ),
        StorefrontEvent::Cart { cart } => (
            "cart",
            json!({
                "type": "cart",
                "cart": cart
            }),
        ),
        StorefrontEvent::Scene {
            product_id,
            accent_color,
        } => (
            "scene",
            json!({
                "type": "scene",
                "product_id": product_id,
                "accent_color": accent_color
            }),
        ),
        StorefrontEvent::Chat { chat } => (
            "chat",
            json!({
                "type": "chat",
                "chat": chat
            }),
        ),
    }
}
