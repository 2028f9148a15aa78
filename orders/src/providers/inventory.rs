//! Inventory sold-count write interface.

use crate::error::Result;
use crate::types::ProductId;
use serde::{Deserialize, Serialize};

/// A per-product sold-count increment.
///
/// A zero quantity is a legal entry and must be passed through to the
/// inventory service as an explicit no-op, not filtered out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoldCountDelta {
    /// The product to increment.
    pub product_id: ProductId,
    /// Units sold.
    pub quantity: u32,
}

/// Inventory writer.
///
/// Called once per delivered order with the aggregated deltas for the whole
/// order. Failures here are the caller's to swallow: sold-count propagation
/// is best-effort and must never block a delivery confirmation.
pub trait InventoryWriter: Send + Sync {
    /// Increment sold counts for a set of products in one call.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory service rejects or cannot apply
    /// the increment.
    async fn increment_sold_count(&self, deltas: Vec<SoldCountDelta>) -> Result<()>;
}
