//! Cart state types

use crate::catalog::{Money, Product, ProductId};
use serde::Serialize;

/// A product held in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    pub product: Product,
    /// Always at least 1
    pub quantity: u32,
}

impl CartEntry {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// Selected product plus cart contents
///
/// Entries keep insertion order and hold at most one entry per product id.
/// Totals are derived on demand and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    pub selected: Option<Product>,
    pub entries: Vec<CartEntry>,
}

impl CartState {
    pub fn new(selected: Option<Product>) -> Self {
        Self {
            selected,
            entries: Vec::new(),
        }
    }

    pub fn entry(&self, id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Badge count: units across all entries
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    pub fn snapshot(&self, drawer_open: bool) -> CartSnapshot {
        CartSnapshot {
            selected: self.selected.clone(),
            accent_color: self.selected.as_ref().map(|p| p.color.clone()),
            entries: self
                .entries
                .iter()
                .map(|e| EntrySnapshot {
                    product: e.product.clone(),
                    quantity: e.quantity,
                    line_total: e.line_total(),
                })
                .collect(),
            drawer_open,
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

/// Immutable view of the cart handed to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub selected: Option<Product>,
    pub accent_color: Option<String>,
    pub entries: Vec<EntrySnapshot>,
    pub drawer_open: bool,
    pub total: Money,
    pub item_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Money,
}
