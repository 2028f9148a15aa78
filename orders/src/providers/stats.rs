//! Buyer statistics interface.

use crate::error::Result;
use crate::types::Order;

/// Buyer statistics service.
///
/// Updated on delivery, independently of the wallet payout: a failure in
/// one must not block the other or the status transition.
pub trait BuyerStatsService: Send + Sync {
    /// Update the buyer's purchase statistics for a delivered order.
    ///
    /// # Errors
    ///
    /// Returns an error if the stats service rejects the update.
    async fn update_buyer_stats_on_delivery(&self, order: &Order) -> Result<()>;
}
