//! Effects produced by cart transitions

/// Effects to be executed after a cart transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEffect {
    /// Slide the cart drawer open
    OpenDrawer,

    /// Publish a fresh cart snapshot to subscribers
    PublishCart,

    /// Retint the bottle viewer for the newly selected product
    RenderScene { accent_color: String },
}
