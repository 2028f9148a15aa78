//! Product catalog read interface.

use crate::error::Result;
use crate::types::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// Catalog product record, as seen by the order core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Current catalog name.
    pub name: String,
    /// Current catalog price in minor units.
    pub price: Money,
    /// Whether the shop currently offers the product.
    pub is_available: bool,
    /// Soft-deletion marker.
    pub is_deleted: bool,
}

impl Product {
    /// Returns `true` if the product can appear on a new order.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        self.is_available && !self.is_deleted
    }
}

/// Product catalog reader.
pub trait ProductReader: Send + Sync {
    /// Look up a product by id; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog service is unreachable.
    async fn find_by_id(&self, product_id: &ProductId) -> Result<Option<Product>>;
}
