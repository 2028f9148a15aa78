//! Wallet payout interface.

use crate::error::Result;
use crate::types::Order;

/// Wallet / payout service.
///
/// Fire-and-forget from the order core's perspective: how money actually
/// moves between ledgers is out of scope. Failures are logged and swallowed
/// by the delivery completion handler.
pub trait WalletService: Send + Sync {
    /// Process the shipper payout for a delivered order.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet service rejects the payout request.
    async fn process_order_payout(&self, order: &Order) -> Result<()>;
}
