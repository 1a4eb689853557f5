//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    CatalogResponse, ChatRequest, ChatResponse, ErrorResponse, ProductRequest, ProductSummary,
    QuantityRequest, StateResponse,
};
use super::AppState;
use crate::cart::{CartEvent, CartSnapshot};
use crate::catalog::ProductId;
use crate::runtime::StorefrontEvent;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Catalog and page bootstrap
        .route("/api/catalog", get(get_catalog))
        .route("/api/state", get(get_state))
        // Viewer
        .route("/api/select", post(select_product))
        // Cart
        .route("/api/cart/items", post(add_item))
        .route("/api/cart/items/:id", delete(remove_item))
        .route("/api/cart/items/:id/quantity", post(update_quantity))
        .route("/api/cart/open", post(open_drawer))
        .route("/api/cart/close", post(close_drawer))
        // Sommelier chat
        .route("/api/chat", post(send_chat))
        // SSE streaming
        .route("/api/events", get(stream_events))
        .with_state(state)
}

// ============================================================
// Catalog
// ============================================================

async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let products = state
        .storefront
        .catalog()
        .products()
        .iter()
        .map(ProductSummary::from)
        .collect();
    Json(CatalogResponse { products })
}

async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(StateResponse {
        cart: state.storefront.snapshot().await,
        chat: state.chat.snapshot(),
    })
}

// ============================================================
// Cart
// ============================================================

fn product_id(raw: ProductId) -> Result<ProductId, AppError> {
    if raw.as_str().trim().is_empty() {
        return Err(AppError::BadRequest("product_id must not be empty".to_string()));
    }
    Ok(raw)
}

async fn select_product(
    State(state): State<AppState>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<CartSnapshot>, AppError> {
    let event = CartEvent::Select {
        product_id: product_id(req.product_id)?,
    };
    Ok(Json(state.storefront.apply(event).await))
}

async fn add_item(
    State(state): State<AppState>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<CartSnapshot>, AppError> {
    let event = CartEvent::Add {
        product_id: product_id(req.product_id)?,
    };
    Ok(Json(state.storefront.apply(event).await))
}

async fn remove_item(State(state): State<AppState>, Path(id): Path<String>) -> Json<CartSnapshot> {
    let event = CartEvent::Remove {
        product_id: ProductId::new(id),
    };
    Json(state.storefront.apply(event).await)
}

async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<QuantityRequest>,
) -> Json<CartSnapshot> {
    let event = CartEvent::UpdateQuantity {
        product_id: ProductId::new(id),
        delta: req.delta,
    };
    Json(state.storefront.apply(event).await)
}

async fn open_drawer(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.storefront.open_drawer().await)
}

async fn close_drawer(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.storefront.close_drawer().await)
}

// ============================================================
// Chat
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    // Captured now so the reply describes what the shopper saw when sending
    let product = state.storefront.selected_context().await;

    let accepted = state
        .chat
        .submit(req.text, product)
        .await
        .map_err(AppError::Unavailable)?;

    Ok(Json(ChatResponse { accepted }))
}

// ============================================================
// SSE Streaming
// ============================================================

async fn stream_events(State(state): State<AppState>) -> impl IntoResponse {
    // Subscribe before snapshotting so nothing falls between init and the stream
    let broadcast_rx = state.broadcast_tx.subscribe();
    let init = StorefrontEvent::Init {
        cart: state.storefront.snapshot().await,
        chat: state.chat.snapshot(),
    };
    sse_stream(init, broadcast_rx)
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Unavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        tracing::warn!(status = %status, error = %message, "Request failed");
        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
