//! Mock product reader for testing.

use crate::error::Result;
use crate::providers::{Product, ProductReader};
use crate::types::ProductId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock product catalog.
#[derive(Debug, Clone, Default)]
pub struct MockProductReader {
    products: Arc<Mutex<HashMap<ProductId, Product>>>,
}

impl MockProductReader {
    /// Create an empty mock catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product.
    pub fn insert(&self, product: Product) {
        if let Ok(mut products) = self.products.lock() {
            products.insert(product.id.clone(), product);
        }
    }
}

impl ProductReader for MockProductReader {
    fn find_by_id(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>>> + Send {
        let found = self
            .products
            .lock()
            .ok()
            .and_then(|products| products.get(product_id).cloned());
        async move { Ok(found) }
    }
}
