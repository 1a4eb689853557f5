//! Property-based tests for the cart state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::transition::transition;
use super::*;
use crate::catalog::{catalog, Money, ProductId};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Catalog ids plus one id that is never in the catalog
fn arb_product_id() -> impl Strategy<Value = ProductId> {
    prop_oneof![
        4 => (1u8..=5).prop_map(|n| ProductId::new(n.to_string())),
        1 => Just(ProductId::new("missing")),
    ]
}

fn arb_event() -> impl Strategy<Value = CartEvent> {
    prop_oneof![
        1 => arb_product_id().prop_map(|product_id| CartEvent::Select { product_id }),
        3 => arb_product_id().prop_map(|product_id| CartEvent::Add { product_id }),
        1 => arb_product_id().prop_map(|product_id| CartEvent::Remove { product_id }),
        2 => (arb_product_id(), -6i64..6)
            .prop_map(|(product_id, delta)| CartEvent::UpdateQuantity { product_id, delta }),
    ]
}

fn run(events: Vec<CartEvent>) -> CartState {
    let mut state = CartState::new(catalog().default_product().cloned());
    for event in events {
        state = transition(&state, catalog(), event).new_state;
    }
    state
}

proptest! {
    #[test]
    fn prop_repeated_add_merges(n in 1u32..40) {
        let id = ProductId::new("4");
        let state = run((0..n).map(|_| CartEvent::Add { product_id: id.clone() }).collect());

        prop_assert_eq!(state.entries.len(), 1);
        prop_assert_eq!(state.entry(&id).map(|e| e.quantity), Some(n));
    }

    #[test]
    fn prop_ids_unique_and_quantities_positive(
        events in proptest::collection::vec(arb_event(), 0..60),
    ) {
        let state = run(events);

        let ids: HashSet<_> = state.entries.iter().map(|e| e.id().clone()).collect();
        prop_assert_eq!(ids.len(), state.entries.len());
        for entry in &state.entries {
            prop_assert!(entry.quantity >= 1);
            prop_assert!(catalog().get(entry.id()).is_some());
        }
    }

    #[test]
    fn prop_totals_are_derived(events in proptest::collection::vec(arb_event(), 0..60)) {
        let state = run(events);

        let expected_total: u64 = state
            .entries
            .iter()
            .map(|e| e.product.price.cents() * u64::from(e.quantity))
            .sum();
        let expected_count: u64 = state.entries.iter().map(|e| u64::from(e.quantity)).sum();

        prop_assert_eq!(state.total(), Money::from_cents(expected_total));
        prop_assert_eq!(state.item_count(), expected_count);
    }

    #[test]
    fn prop_decrement_floor(n in 1u32..20, extra in 0i64..10) {
        let id = ProductId::new("2");
        let state = run((0..n).map(|_| CartEvent::Add { product_id: id.clone() }).collect());

        // Driving to zero or below is refused
        let delta = -(i64::from(n) + extra);
        let event = CartEvent::UpdateQuantity { product_id: id.clone(), delta };
        let result = transition(&state, catalog(), event);
        prop_assert!(result.is_noop());
        prop_assert_eq!(result.new_state.entry(&id).map(|e| e.quantity), Some(n));

        // Stopping at one is allowed
        let delta = -(i64::from(n) - 1);
        let event = CartEvent::UpdateQuantity { product_id: id.clone(), delta };
        let state = transition(&state, catalog(), event).new_state;
        prop_assert_eq!(state.entry(&id).map(|e| e.quantity), Some(1));
    }

    #[test]
    fn prop_removed_entry_stays_removed(
        events in proptest::collection::vec(arb_event(), 0..30),
        delta in 1i64..5,
    ) {
        let id = ProductId::new("1");
        let mut state = run(events);
        let remove = CartEvent::Remove { product_id: id.clone() };
        state = transition(&state, catalog(), remove).new_state;
        let update = CartEvent::UpdateQuantity { product_id: id.clone(), delta };
        state = transition(&state, catalog(), update).new_state;

        prop_assert!(state.entry(&id).is_none());
    }

    #[test]
    fn prop_unknown_ids_never_change_state(
        events in proptest::collection::vec(arb_event(), 0..30),
        event in arb_event(),
    ) {
        let state = run(events);
        let unknown = catalog().get(event.product_id()).is_none();
        let result = transition(&state, catalog(), event);

        if unknown {
            prop_assert!(result.is_noop());
        }
        if result.is_noop() {
            prop_assert_eq!(result.new_state, state);
        }
    }
}
