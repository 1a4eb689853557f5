//! Shopping-cart state machine
//!
//! Same Elm-style split as the chat session: pure transitions over
//! `CartState`, with effects executed by the storefront runtime.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::CartEffect;
pub use event::CartEvent;
pub use state::{CartEntry, CartSnapshot, CartState};
pub use transition::transition;
