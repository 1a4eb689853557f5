//! Events that can occur in a chat session

use super::state::{MessageStamp, ProductContext};

/// Events that trigger session transitions
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Shopper sent a message
    Submit {
        text: String,
        /// Selected product, captured when the message was sent
        product: Option<ProductContext>,
        stamp: MessageStamp,
    },

    /// Responder resolved the outstanding request
    ReplyReady {
        request_id: String,
        text: String,
        stamp: MessageStamp,
    },
}
