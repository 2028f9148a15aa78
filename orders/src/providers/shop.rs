//! Shop read interface.

use crate::error::Result;
use crate::types::{Money, ShopId};
use serde::{Deserialize, Serialize};

/// Administrative shop status.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShopStatus {
    /// Accepting orders.
    Open,
    /// Temporarily not accepting orders.
    Closed,
    /// Suspended by the platform.
    Suspended,
}

/// Shop record, as seen by the order core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Shop identifier.
    pub id: ShopId,
    /// Display name.
    pub name: String,
    /// Owner-controlled open/closed toggle, independent of `status`.
    pub is_open: bool,
    /// Administrative status.
    pub status: ShopStatus,
    /// Flat delivery fee charged per order, in minor units.
    pub ship_fee_per_order: Money,
}

impl Shop {
    /// Returns `true` if the shop can accept a new order right now.
    ///
    /// Both the owner toggle and the administrative status must allow it.
    #[must_use]
    pub fn accepts_orders(&self) -> bool {
        self.is_open && self.status == ShopStatus::Open
    }
}

/// Shop reader.
pub trait ShopReader: Send + Sync {
    /// Look up a shop by id; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the shop service is unreachable.
    async fn find_by_id(&self, shop_id: &ShopId) -> Result<Option<Shop>>;
}
