//! Mock collaborator implementations for testing.
//!
//! Simple, in-memory implementations of all provider traits for use in
//! unit and integration tests. Recorder mocks capture their calls so tests
//! can assert on exact side-effect counts; failure toggles force the
//! error paths.

pub mod address;
pub mod cart;
pub mod clock;
pub mod inventory;
pub mod product;
pub mod shop;
pub mod stats;
pub mod store;
pub mod wallet;

pub use address::MockAddressReader;
pub use cart::MockCartReader;
pub use clock::FixedClock;
pub use inventory::MockInventoryWriter;
pub use product::MockProductReader;
pub use shop::MockShopReader;
pub use stats::MockBuyerStatsService;
pub use store::InMemoryOrderStore;
pub use wallet::MockWalletService;
