//! # Zipmart Orders
//!
//! Order lifecycle core for a multi-party (customer / shop / shipper)
//! delivery marketplace: creation from a cart, guarded status transitions
//! through preparation and delivery, and the one-time side effects of
//! delivery completion.
//!
//! ## Guarantees
//!
//! - **Exactly-once creation**: an order is built from a consistent
//!   pre-fetched read of cart/shop/product/address state and persisted
//!   together with the cart-group clear in one atomic unit of work. The
//!   [`unit_of_work`] typestate makes the read-then-write discipline a
//!   compile-time property.
//! - **Strict transition protocol**: [`state_machine::OrderStateMachine`]
//!   is the authoritative adjacency table; every status-changing write is
//!   guarded by the status it was decided on, so concurrent writers
//!   conflict instead of silently overwriting.
//! - **Idempotent completion**: the persisted `sold_count_applied` flag
//!   makes the inventory side effect one-time under at-least-once
//!   invocation, without a lock manager. Inventory, payout and stats
//!   failures are logged and swallowed — delivery confirmation is the
//!   durable fact.
//!
//! ## Example: creating an order
//!
//! ```rust,ignore
//! use zipmart_orders::creation::{create_order, CreateOrderRequest};
//!
//! let order = create_order(&env, &customer_id, CreateOrderRequest {
//!     shop_id,
//!     delivery: DeliveryDetails {
//!         delivery_address_id: Some(address_id),
//!         ..DeliveryDetails::default()
//!     },
//!     payment_method: "cash".into(),
//!     discount: Money::ZERO,
//!     customer_snapshot: None,
//! }).await?;
//! assert_eq!(order.status, OrderStatus::Pending);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod address;
pub mod completion;
pub mod config;
pub mod constants;
pub mod creation;
pub mod environment;
pub mod error;
pub mod projection;
pub mod providers;
pub mod state_machine;
pub mod transitions;
pub mod types;
pub mod unit_of_work;
pub mod views;

// Mock collaborators for testing
#[cfg(feature = "test-utils")]
pub mod mocks;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export main types for convenience
pub use config::OrdersConfig;
pub use environment::{Clock, OrderEnvironment, SystemClock};
pub use error::{ErrorKind, OrderError, Result};
pub use state_machine::OrderStateMachine;
pub use types::{Order, OrderId, OrderStatus, PaymentStatus};
