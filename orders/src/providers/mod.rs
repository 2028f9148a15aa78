//! External collaborators of the order core.
//!
//! This module defines traits for every external dependency the order
//! lifecycle touches. They are **interfaces**, not implementations: the
//! domain operations depend on these traits, and the runtime wires in
//! concrete services.
//!
//! This enables:
//! - **Testing**: in-memory mocks, deterministic and fast
//! - **Production**: real services (document store, wallet ledger, ...)
//! - **Development**: instrumented versions (logging, tracing)
//!
//! Readers (`CartReader`, `ProductReader`, `ShopReader`, `AddressReader`)
//! feed the read phase of a creation unit of work. `OrderStore` is the
//! transactional store that applies sealed units of work atomically. The
//! remaining writers (`InventoryWriter`, `WalletService`,
//! `BuyerStatsService`) are best-effort delivery side effects and may fail
//! independently of each other.

pub mod address;
pub mod cart;
pub mod inventory;
pub mod product;
pub mod shop;
pub mod stats;
pub mod store;
pub mod wallet;

// Re-export collaborator traits and their data models
pub use address::{AddressReader, SavedAddress};
pub use cart::{CartGroup, CartItem, CartReader, CartView};
pub use inventory::{InventoryWriter, SoldCountDelta};
pub use product::{Product, ProductReader};
pub use shop::{Shop, ShopReader, ShopStatus};
pub use stats::BuyerStatsService;
pub use store::{require_order, OrderStore};
pub use wallet::WalletService;
