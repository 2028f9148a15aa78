//! Mock saved-address reader for testing.

use crate::error::Result;
use crate::providers::{AddressReader, SavedAddress};
use crate::types::AddressId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock address store with a lookup counter.
///
/// The counter lets tests assert the inline-snapshot path performs zero
/// store lookups.
#[derive(Debug, Clone, Default)]
pub struct MockAddressReader {
    addresses: Arc<Mutex<HashMap<AddressId, SavedAddress>>>,
    lookups: Arc<Mutex<usize>>,
}

impl MockAddressReader {
    /// Create an empty mock address store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a saved address.
    pub fn insert(&self, address: SavedAddress) {
        if let Ok(mut addresses) = self.addresses.lock() {
            addresses.insert(address.id.clone(), address);
        }
    }

    /// Number of `find_by_id` calls so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.lock().map(|n| *n).unwrap_or(0)
    }
}

impl AddressReader for MockAddressReader {
    fn find_by_id(
        &self,
        address_id: &AddressId,
    ) -> impl Future<Output = Result<Option<SavedAddress>>> + Send {
        if let Ok(mut n) = self.lookups.lock() {
            *n += 1;
        }
        let found = self
            .addresses
            .lock()
            .ok()
            .and_then(|addresses| addresses.get(address_id).cloned());
        async move { Ok(found) }
    }
}
