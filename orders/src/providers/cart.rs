//! Cart read interface.

use crate::error::Result;
use crate::types::{CustomerId, Money, ProductId, ShopId};
use serde::{Deserialize, Serialize};

/// A single cart line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier.
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub product_name: String,
    /// Quantity in the cart.
    pub quantity: u32,
    /// Unit price at the time it was added, in minor units.
    pub price: Money,
}

/// The cart lines for one shop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartGroup {
    /// The shop these lines belong to.
    pub shop_id: ShopId,
    /// The lines.
    pub items: Vec<CartItem>,
    /// Group subtotal as maintained by the cart service.
    pub subtotal: Money,
}

/// A customer's cart, grouped by shop.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
    /// One group per shop with items in the cart.
    pub groups: Vec<CartGroup>,
}

impl CartView {
    /// Finds the group for a shop, if the cart has one.
    #[must_use]
    pub fn group_for(&self, shop_id: &ShopId) -> Option<&CartGroup> {
        self.groups.iter().find(|g| &g.shop_id == shop_id)
    }
}

/// Cart reader.
///
/// Cart storage and grouping itself is an external concern; the order core
/// only consumes this read view.
pub trait CartReader: Send + Sync {
    /// Get the customer's cart grouped by shop.
    ///
    /// A customer with no cart yields an empty view, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart service is unreachable.
    async fn get_cart_grouped(&self, customer_id: &CustomerId) -> Result<CartView>;
}
