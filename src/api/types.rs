//! API request and response types

use crate::cart::CartSnapshot;
use crate::catalog::{Product, ProductId};
use crate::chat::ChatSnapshot;
use serde::{Deserialize, Serialize};

/// Request naming one product
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub product_id: ProductId,
}

/// Request to adjust an entry's quantity
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub delta: i64,
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for chat action
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// False when the message was blank or a reply is still pending
    pub accepted: bool,
}

/// Catalog entry with its list caption
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    #[serde(flatten)]
    pub product: Product,
    pub headline_note: Option<String>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            product: product.clone(),
            headline_note: product.headline_note().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub products: Vec<ProductSummary>,
}

/// Everything a freshly loaded page needs
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub cart: CartSnapshot,
    pub chat: ChatSnapshot,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
