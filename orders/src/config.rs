//! Order core configuration.
//!
//! Configuration values should be provided by the application, not
//! hardcoded in business logic.

use crate::types::Money;

/// Pricing and numbering configuration.
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    /// Prefix of generated order numbers (e.g. "ZM" → `ZM-20260824-7F3K9Q`).
    pub order_number_prefix: String,

    /// Shipper payout as basis points of the ship fee.
    ///
    /// Default: 8000 (80%).
    pub shipper_payout_rate_bps: u32,
}

impl OrdersConfig {
    /// Create a new configuration with the given order-number prefix.
    #[must_use]
    pub const fn new(order_number_prefix: String) -> Self {
        Self {
            order_number_prefix,
            shipper_payout_rate_bps: 8_000,
        }
    }

    /// Set the shipper payout rate in basis points of the ship fee.
    #[must_use]
    pub const fn with_shipper_payout_rate_bps(mut self, bps: u32) -> Self {
        self.shipper_payout_rate_bps = bps;
        self
    }

    /// Computes the shipper payout for an order with the given ship fee.
    ///
    /// Integer division truncates; the rounding is fixed here, at creation
    /// time, and never recomputed later.
    #[must_use]
    pub const fn shipper_payout(&self, ship_fee: Money) -> Money {
        Money::from_minor(ship_fee.minor() * self.shipper_payout_rate_bps as i64 / 10_000)
    }
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            order_number_prefix: "ZM".to_string(),
            shipper_payout_rate_bps: 8_000,
        }
    }
}
