//! Core domain types for the order lifecycle.
//!
//! An [`Order`] is a single customer purchase from one shop, tracked through
//! a fixed delivery lifecycle: PENDING → CONFIRMED → PREPARING → READY →
//! SHIPPING → DELIVERED, with CANCELLED reachable from the early states.
//! Line items, the delivery address and party contact data are denormalized
//! snapshots taken at write time, never live references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new id from a string.
            #[must_use]
            pub const fn new(id: String) -> Self {
                Self(id)
            }

            /// Returns the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

id_type! {
    /// Unique identifier for an order.
    OrderId
}
id_type! {
    /// Unique identifier for a customer.
    CustomerId
}
id_type! {
    /// Unique identifier for a shop.
    ShopId
}
id_type! {
    /// Unique identifier for a shipper.
    ShipperId
}
id_type! {
    /// Unique identifier for a product.
    ProductId
}
id_type! {
    /// Unique identifier for a saved delivery address.
    AddressId
}

/// Money amount in minor currency units (to avoid floating point issues).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates a new money amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the value in minor units.
    #[must_use]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Multiplies by an item quantity.
    #[must_use]
    pub const fn times(&self, quantity: u32) -> Self {
        Self(self.0 * quantity as i64)
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of an order in its delivery lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created from the cart, awaiting shop confirmation.
    Pending,
    /// Confirmed by the shop owner.
    Confirmed,
    /// The shop is preparing the items.
    Preparing,
    /// Ready for pickup by a shipper.
    Ready,
    /// Picked up, on the way to the customer.
    Shipping,
    /// Delivered to the customer (terminal).
    Delivered,
    /// Cancelled before shipping (terminal).
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Shipping => "SHIPPING",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        };
        write!(f, "{name}")
    }
}

/// Payment state, tracked independently of delivery status.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Payment not yet received.
    Unpaid,
    /// Payment received.
    Paid,
}

/// Opaque payment method label (e.g. `cash`, `e-wallet`).
///
/// The order core passes it through without interpreting it; payment
/// gateway integration is an external concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod(String);

impl PaymentMethod {
    /// Creates a payment method label.
    #[must_use]
    pub const fn new(method: String) -> Self {
        Self(method)
    }

    /// Returns the inner label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PaymentMethod {
    fn from(method: &str) -> Self {
        Self(method.to_string())
    }
}

/// A denormalized order line, snapshotted from the cart at creation.
///
/// Immutable afterward: later catalog price changes must not alter history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product identifier.
    pub product_id: ProductId,
    /// Product name at the time of ordering.
    pub product_name: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Unit price at the time of ordering, in minor units.
    pub price: Money,
    /// Line subtotal (`price * quantity`).
    pub subtotal: Money,
}

impl OrderItem {
    /// Creates a line item, computing its subtotal.
    #[must_use]
    pub const fn new(product_id: ProductId, product_name: String, quantity: u32, price: Money) -> Self {
        Self {
            product_id,
            product_name,
            quantity,
            subtotal: price.times(quantity),
            price,
        }
    }
}

/// Immutable delivery address snapshot, captured once at creation and never
/// re-fetched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSnapshot {
    /// Optional label (e.g. "Home", "Dorm B").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Full street address.
    pub full_address: String,
    /// Optional building.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    /// Optional room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Optional delivery note stored with the address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Denormalized contact snapshot for a customer or shipper.
///
/// May be absent on orders created before snapshotting was introduced; the
/// list projection backfills those from caller-supplied maps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySnapshot {
    /// The party's id.
    pub id: String,
    /// Display name at snapshot time.
    pub display_name: String,
    /// Phone number, if the party had one on file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A customer order, the unit of mutation in the system.
///
/// Identity fields are immutable; `status` and its companion timestamps only
/// move through [`OrderStateMachine`](crate::state_machine::OrderStateMachine)
/// guarded writes. Orders are never deleted — cancellation is a terminal
/// status, not removal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: OrderId,
    /// Unique human-readable order number, generated at creation.
    pub order_number: String,
    /// The ordering customer.
    pub customer_id: CustomerId,
    /// The shop the order was placed with.
    pub shop_id: ShopId,
    /// The accepting shipper; `None` until accepted, never unset once delivered.
    pub shipper_id: Option<ShipperId>,
    /// Denormalized line items, immutable after creation.
    pub items: Vec<OrderItem>,
    /// Sum of line subtotals.
    pub subtotal: Money,
    /// Delivery fee charged to the customer.
    pub ship_fee: Money,
    /// Discount applied at creation.
    pub discount: Money,
    /// Payout owed to the shipper, fixed at creation.
    pub shipper_payout: Money,
    /// `subtotal - discount + ship_fee`.
    pub total: Money,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Payment state, independent of delivery status.
    pub payment_status: PaymentStatus,
    /// Opaque payment method label.
    pub payment_method: PaymentMethod,
    /// Immutable delivery address snapshot.
    pub delivery_address: AddressSnapshot,
    /// Customer-supplied note override, wins over the address's own note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_note: Option<String>,
    /// Customer contact snapshot, captured at creation when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_snapshot: Option<PartySnapshot>,
    /// Shipper contact snapshot, captured at acceptance when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipper_snapshot: Option<PartySnapshot>,
    /// Guards the one-time inventory side effect on delivery.
    pub sold_count_applied: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time; absent only on legacy records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// When the shop confirmed the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    /// When preparation started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparing_at: Option<DateTime<Utc>>,
    /// When the order became ready for pickup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<DateTime<Utc>>,
    /// When the shipper picked the order up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_at: Option<DateTime<Utc>>,
    /// When the order was delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    /// When the order was cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Records a status change, stamping the matching transition timestamp
    /// and `updated_at`. All other fields are left untouched.
    ///
    /// Callers must have validated the transition first; this method only
    /// performs the bookkeeping.
    pub fn record_transition(&mut self, to: OrderStatus, at: DateTime<Utc>) {
        self.status = to;
        self.updated_at = Some(at);
        match to {
            OrderStatus::Pending => {},
            OrderStatus::Confirmed => self.confirmed_at = Some(at),
            OrderStatus::Preparing => self.preparing_at = Some(at),
            OrderStatus::Ready => self.ready_at = Some(at),
            OrderStatus::Shipping => self.shipping_at = Some(at),
            OrderStatus::Delivered => self.delivered_at = Some(at),
            OrderStatus::Cancelled => self.cancelled_at = Some(at),
        }
    }
}
