//! Chat session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! The transcript is only ever extended through `ChatEffect::AppendMessage`.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::ChatEffect;
pub use event::ChatEvent;
pub use state::{
    ChatSnapshot, ChatState, MessageStamp, ProductContext, ReplyRequest, Role, Transcript,
};
pub use transition::transition;
