//! Cart and viewer state shared by the HTTP handlers

use super::StorefrontEvent;
use crate::cart::{transition, CartEffect, CartEvent, CartSnapshot, CartState};
use crate::catalog::{Catalog, Product};
use crate::chat::ProductContext;
use tokio::sync::{broadcast, Mutex};

#[derive(Debug)]
struct Shelf {
    cart: CartState,
    drawer_open: bool,
}

impl Shelf {
    fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot(self.drawer_open)
    }
}

/// Serializes cart events and executes their effects
pub struct Storefront {
    catalog: &'static Catalog,
    shelf: Mutex<Shelf>,
    broadcast_tx: broadcast::Sender<StorefrontEvent>,
}

impl Storefront {
    /// Opens with the first catalog product in the viewer and an empty cart
    pub fn new(
        catalog: &'static Catalog,
        broadcast_tx: broadcast::Sender<StorefrontEvent>,
    ) -> Self {
        Self {
            catalog,
            shelf: Mutex::new(Shelf {
                cart: CartState::new(catalog.default_product().cloned()),
                drawer_open: false,
            }),
            broadcast_tx,
        }
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub async fn apply(&self, event: CartEvent) -> CartSnapshot {
        let mut shelf = self.shelf.lock().await;

        let name = event.name();
        let product_id = event.product_id().clone();
        let result = transition(&shelf.cart, self.catalog, event);

        if result.is_noop() {
            tracing::debug!(event = name, product_id = %product_id, "Cart event changed nothing");
            return shelf.snapshot();
        }

        tracing::info!(event = name, product_id = %product_id, "Cart updated");
        shelf.cart = result.new_state;
        for effect in result.effects {
            self.execute_effect(&mut shelf, effect);
        }
        shelf.snapshot()
    }

    fn execute_effect(&self, shelf: &mut Shelf, effect: CartEffect) {
        match effect {
            CartEffect::OpenDrawer => shelf.drawer_open = true,
            CartEffect::PublishCart => {
                let _ = self.broadcast_tx.send(StorefrontEvent::Cart {
                    cart: shelf.snapshot(),
                });
            }
            CartEffect::RenderScene { accent_color } => {
                if let Some(product) = &shelf.cart.selected {
                    let _ = self.broadcast_tx.send(StorefrontEvent::Scene {
                        product_id: product.id.clone(),
                        accent_color,
                    });
                }
            }
        }
    }

    pub async fn open_drawer(&self) -> CartSnapshot {
        self.set_drawer(true).await
    }

    pub async fn close_drawer(&self) -> CartSnapshot {
        self.set_drawer(false).await
    }

    async fn set_drawer(&self, open: bool) -> CartSnapshot {
        let mut shelf = self.shelf.lock().await;
        if shelf.drawer_open != open {
            shelf.drawer_open = open;
            let _ = self.broadcast_tx.send(StorefrontEvent::Cart {
                cart: shelf.snapshot(),
            });
        }
        shelf.snapshot()
    }

    pub async fn snapshot(&self) -> CartSnapshot {
        self.shelf.lock().await.snapshot()
    }

    pub async fn selected_product(&self) -> Option<Product> {
        self.shelf.lock().await.cart.selected.clone()
    }

    /// What the sommelier should know about the product in the viewer
    pub async fn selected_context(&self) -> Option<ProductContext> {
        self.selected_product().await.as_ref().map(ProductContext::from)
    }
}
