//! Mock shop reader for testing.

use crate::error::Result;
use crate::providers::{Shop, ShopReader};
use crate::types::ShopId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock shop directory.
#[derive(Debug, Clone, Default)]
pub struct MockShopReader {
    shops: Arc<Mutex<HashMap<ShopId, Shop>>>,
}

impl MockShopReader {
    /// Create an empty mock directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a shop.
    pub fn insert(&self, shop: Shop) {
        if let Ok(mut shops) = self.shops.lock() {
            shops.insert(shop.id.clone(), shop);
        }
    }
}

impl ShopReader for MockShopReader {
    fn find_by_id(&self, shop_id: &ShopId) -> impl Future<Output = Result<Option<Shop>>> + Send {
        let found = self
            .shops
            .lock()
            .ok()
            .and_then(|shops| shops.get(shop_id).cloned());
        async move { Ok(found) }
    }
}
