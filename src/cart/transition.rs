//! Pure cart transition function
//!
//! Every event resolves to a new state. Events that reference an unknown
//! product or an absent entry leave the state untouched and produce no
//! effects.

use super::{CartEffect, CartEntry, CartEvent, CartState};
use crate::catalog::Catalog;

/// Result of a cart transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: CartState,
    pub effects: Vec<CartEffect>,
}

impl TransitionResult {
    pub fn new(state: CartState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: CartEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// True when the event was ignored
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

pub fn transition(state: &CartState, catalog: &Catalog, event: CartEvent) -> TransitionResult {
    match event {
        CartEvent::Select { product_id } => {
            let Some(product) = catalog.get(&product_id) else {
                return TransitionResult::new(state.clone());
            };
            let accent_color = product.color.clone();
            let new_state = CartState {
                selected: Some(product.clone()),
                entries: state.entries.clone(),
            };
            TransitionResult::new(new_state)
                .with_effect(CartEffect::RenderScene { accent_color })
                .with_effect(CartEffect::PublishCart)
        }

        // Merge into an existing entry, otherwise append with quantity 1
        CartEvent::Add { product_id } => {
            let Some(product) = catalog.get(&product_id) else {
                return TransitionResult::new(state.clone());
            };
            let mut entries = state.entries.clone();
            match entries.iter_mut().find(|e| e.id() == &product_id) {
                Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
                None => entries.push(CartEntry::new(product.clone())),
            }
            let new_state = CartState {
                selected: state.selected.clone(),
                entries,
            };
            TransitionResult::new(new_state)
                .with_effect(CartEffect::OpenDrawer)
                .with_effect(CartEffect::PublishCart)
        }

        CartEvent::Remove { product_id } => {
            if state.entry(&product_id).is_none() {
                return TransitionResult::new(state.clone());
            }
            let new_state = CartState {
                selected: state.selected.clone(),
                entries: state
                    .entries
                    .iter()
                    .filter(|e| e.id() != &product_id)
                    .cloned()
                    .collect(),
            };
            TransitionResult::new(new_state).with_effect(CartEffect::PublishCart)
        }

        // Quantity never drops below 1 here; removal is a separate action
        CartEvent::UpdateQuantity { product_id, delta } => {
            let Some(entry) = state.entry(&product_id) else {
                return TransitionResult::new(state.clone());
            };
            let Some(quantity) = adjusted_quantity(entry.quantity, delta) else {
                return TransitionResult::new(state.clone());
            };
            let mut new_state = state.clone();
            for e in &mut new_state.entries {
                if e.id() == &product_id {
                    e.quantity = quantity;
                }
            }
            TransitionResult::new(new_state).with_effect(CartEffect::PublishCart)
        }
    }
}

/// `quantity + delta` when the result is still positive and changed
fn adjusted_quantity(quantity: u32, delta: i64) -> Option<u32> {
    if delta == 0 {
        return None;
    }
    let next = i64::from(quantity).checked_add(delta)?;
    if next <= 0 {
        return None;
    }
    u32::try_from(next).ok()
}
