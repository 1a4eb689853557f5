//! Events accepted by the cart

use crate::catalog::ProductId;

/// User actions on the catalog and cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Show a product in the viewer
    Select { product_id: ProductId },
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Drop the whole entry
    Remove { product_id: ProductId },
    /// Adjust an entry by `delta` units
    UpdateQuantity { product_id: ProductId, delta: i64 },
}

impl CartEvent {
    pub fn product_id(&self) -> &ProductId {
        match self {
            CartEvent::Select { product_id }
            | CartEvent::Add { product_id }
            | CartEvent::Remove { product_id }
            | CartEvent::UpdateQuantity { product_id, .. } => product_id,
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            CartEvent::Select { .. } => "select",
            CartEvent::Add { .. } => "add",
            CartEvent::Remove { .. } => "remove",
            CartEvent::UpdateQuantity { .. } => "update_quantity",
        }
    }
}
