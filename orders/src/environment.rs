//! Order environment.
//!
//! This module defines the environment type for dependency injection in the
//! order lifecycle operations, plus the [`Clock`] abstraction.

use crate::config::OrdersConfig;
use crate::providers::{
    AddressReader, BuyerStatsService, CartReader, InventoryWriter, OrderStore, ProductReader,
    ShopReader, WalletService,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Clock trait - abstracts time operations for testability.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Order environment.
///
/// Contains all external dependencies needed by the order lifecycle
/// operations.
///
/// # Type Parameters
///
/// - `C`: Cart reader
/// - `P`: Product reader
/// - `S`: Shop reader
/// - `A`: Address reader
/// - `I`: Inventory writer
/// - `W`: Wallet / payout service
/// - `B`: Buyer stats service
/// - `O`: Transactional order store
#[derive(Clone)]
pub struct OrderEnvironment<C, P, S, A, I, W, B, O>
where
    C: CartReader + Clone,
    P: ProductReader + Clone,
    S: ShopReader + Clone,
    A: AddressReader + Clone,
    I: InventoryWriter + Clone,
    W: WalletService + Clone,
    B: BuyerStatsService + Clone,
    O: OrderStore + Clone,
{
    /// Cart reader.
    pub carts: C,

    /// Product catalog reader.
    pub products: P,

    /// Shop reader.
    pub shops: S,

    /// Saved address reader.
    pub addresses: A,

    /// Inventory sold-count writer (best-effort on delivery).
    pub inventory: I,

    /// Wallet / payout service (fire-and-forget).
    pub wallet: W,

    /// Buyer statistics service (independently failing).
    pub stats: B,

    /// Transactional order store.
    pub store: O,

    /// Clock for timestamps.
    pub clock: Arc<dyn Clock>,

    /// Pricing and numbering configuration.
    pub config: OrdersConfig,
}

impl<C, P, S, A, I, W, B, O> OrderEnvironment<C, P, S, A, I, W, B, O>
where
    C: CartReader + Clone,
    P: ProductReader + Clone,
    S: ShopReader + Clone,
    A: AddressReader + Clone,
    I: InventoryWriter + Clone,
    W: WalletService + Clone,
    B: BuyerStatsService + Clone,
    O: OrderStore + Clone,
{
    /// Create a new order environment.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        carts: C,
        products: P,
        shops: S,
        addresses: A,
        inventory: I,
        wallet: W,
        stats: B,
        store: O,
        clock: Arc<dyn Clock>,
        config: OrdersConfig,
    ) -> Self {
        Self {
            carts,
            products,
            shops,
            addresses,
            inventory,
            wallet,
            stats,
            store,
            clock,
            config,
        }
    }
}
