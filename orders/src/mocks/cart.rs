//! Mock cart reader for testing.

use crate::error::Result;
use crate::providers::{CartReader, CartView};
use crate::types::{CustomerId, ShopId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock cart reader.
///
/// Uses in-memory storage; [`InMemoryOrderStore`](crate::mocks::InMemoryOrderStore)
/// can share a handle so committed cart-group clears are observable here.
#[derive(Debug, Clone, Default)]
pub struct MockCartReader {
    carts: Arc<Mutex<HashMap<CustomerId, CartView>>>,
}

impl MockCartReader {
    /// Create an empty mock cart reader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a customer's cart.
    pub fn set_cart(&self, customer_id: CustomerId, view: CartView) {
        if let Ok(mut carts) = self.carts.lock() {
            carts.insert(customer_id, view);
        }
    }

    /// Removes one shop group from a customer's cart.
    pub fn clear_group(&self, customer_id: &CustomerId, shop_id: &ShopId) {
        if let Ok(mut carts) = self.carts.lock() {
            if let Some(view) = carts.get_mut(customer_id) {
                view.groups.retain(|g| &g.shop_id != shop_id);
            }
        }
    }

    /// Current cart view for a customer (empty if none).
    #[must_use]
    pub fn cart_of(&self, customer_id: &CustomerId) -> CartView {
        self.carts
            .lock()
            .ok()
            .and_then(|carts| carts.get(customer_id).cloned())
            .unwrap_or_default()
    }
}

impl CartReader for MockCartReader {
    fn get_cart_grouped(
        &self,
        customer_id: &CustomerId,
    ) -> impl Future<Output = Result<CartView>> + Send {
        let view = self.cart_of(customer_id);
        async move { Ok(view) }
    }
}
