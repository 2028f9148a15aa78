//! Two-phase atomic units of work.
//!
//! The transactional store applies a unit of work all-or-nothing, but it
//! enforces a hard ordering constraint: every read must complete before the
//! first write is issued. Rather than detecting violations at runtime, the
//! builder encodes the discipline in the type system — a
//! [`UnitOfWork<ReadPhase>`] only accepts reads, and writes become available
//! only after [`seal_reads`](UnitOfWork::seal_reads) converts it into a
//! [`UnitOfWork<WritePhase>`]. There is no way back.
//!
//! Staged reads are retained in the sealed unit so store implementations can
//! use them for conflict detection; staged writes carry their own guards
//! ([`OrderPatch`]) for the conditional updates that back the idempotence
//! defenses of the delivery path.

use crate::error::{OrderError, Result};
use crate::types::{
    AddressId, CustomerId, Order, OrderId, OrderStatus, PartySnapshot, PaymentStatus, ProductId,
    ShipperId, ShopId,
};
use chrono::{DateTime, Utc};
use std::marker::PhantomData;

/// Marker for a unit of work still collecting reads.
#[derive(Debug)]
pub struct ReadPhase;

/// Marker for a sealed unit of work collecting writes.
#[derive(Debug)]
pub struct WritePhase;

/// Identifies a record read during the read phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadKey {
    /// The customer's cart document.
    Cart(CustomerId),
    /// A shop record.
    Shop(ShopId),
    /// A product record.
    Product(ProductId),
    /// A saved delivery address.
    Address(AddressId),
    /// An order record.
    Order(OrderId),
}

/// A guarded partial update of an order record.
///
/// Guards (`expected_*`) make the write conditional: if the stored record no
/// longer matches, the whole unit of work fails with a conflict and nothing
/// is applied. This is the single mechanism behind both optimistic
/// concurrency on status transitions and the one-time `sold_count_applied`
/// flip.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderPatch {
    /// New status, stamping the matching transition timestamp.
    pub status: Option<OrderStatus>,
    /// New payment status.
    pub payment_status: Option<PaymentStatus>,
    /// Shipper assignment.
    pub shipper_id: Option<ShipperId>,
    /// Shipper contact snapshot captured at assignment.
    pub shipper_snapshot: Option<PartySnapshot>,
    /// New value for the one-time inventory guard flag.
    pub sold_count_applied: Option<bool>,
    /// Timestamp applied to every field this patch touches.
    pub stamped_at: DateTime<Utc>,
    /// Guard: the stored status must equal this before applying.
    pub expected_status: Option<OrderStatus>,
    /// Guard: the stored `sold_count_applied` must equal this before applying.
    pub expected_sold_count_applied: Option<bool>,
}

impl OrderPatch {
    /// Creates an empty patch stamped at `stamped_at`.
    #[must_use]
    pub const fn at(stamped_at: DateTime<Utc>) -> Self {
        Self {
            status: None,
            payment_status: None,
            shipper_id: None,
            shipper_snapshot: None,
            sold_count_applied: None,
            stamped_at,
            expected_status: None,
            expected_sold_count_applied: None,
        }
    }

    /// Sets the new status.
    #[must_use]
    pub const fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the new payment status.
    #[must_use]
    pub const fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    /// Assigns a shipper, with an optional contact snapshot.
    #[must_use]
    pub fn with_shipper(mut self, shipper_id: ShipperId, snapshot: Option<PartySnapshot>) -> Self {
        self.shipper_id = Some(shipper_id);
        self.shipper_snapshot = snapshot;
        self
    }

    /// Sets the one-time inventory guard flag.
    #[must_use]
    pub const fn with_sold_count_applied(mut self, applied: bool) -> Self {
        self.sold_count_applied = Some(applied);
        self
    }

    /// Requires the stored status to equal `status` at apply time.
    #[must_use]
    pub const fn expect_status(mut self, status: OrderStatus) -> Self {
        self.expected_status = Some(status);
        self
    }

    /// Requires the stored guard flag to equal `applied` at apply time.
    #[must_use]
    pub const fn expect_sold_count_applied(mut self, applied: bool) -> Self {
        self.expected_sold_count_applied = Some(applied);
        self
    }

    /// Applies the patch to an order record, checking guards first.
    ///
    /// Store implementations call this against their current copy of the
    /// record inside the atomic apply.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Conflict`] when a guard does not match the
    /// stored record; the caller must abort the whole unit of work.
    pub fn apply_to(&self, order: &mut Order) -> Result<()> {
        if let Some(expected) = self.expected_status {
            if order.status != expected {
                return Err(OrderError::Conflict {
                    reason: format!(
                        "expected status {expected}, found {}",
                        order.status
                    ),
                });
            }
        }
        if let Some(expected) = self.expected_sold_count_applied {
            if order.sold_count_applied != expected {
                return Err(OrderError::Conflict {
                    reason: format!(
                        "expected sold_count_applied = {expected}, found {}",
                        order.sold_count_applied
                    ),
                });
            }
        }

        if let Some(status) = self.status {
            order.record_transition(status, self.stamped_at);
        }
        if let Some(payment_status) = self.payment_status {
            order.payment_status = payment_status;
            order.updated_at = Some(self.stamped_at);
        }
        if let Some(shipper_id) = &self.shipper_id {
            order.shipper_id = Some(shipper_id.clone());
            order.updated_at = Some(self.stamped_at);
        }
        if let Some(snapshot) = &self.shipper_snapshot {
            order.shipper_snapshot = Some(snapshot.clone());
        }
        if let Some(applied) = self.sold_count_applied {
            order.sold_count_applied = applied;
            order.updated_at = Some(self.stamped_at);
        }
        Ok(())
    }
}

/// A single staged mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum OrderWrite {
    /// Insert a freshly built order record.
    Insert(Box<Order>),
    /// Empty the cart group that produced the order.
    ClearCartGroup {
        /// The cart owner.
        customer_id: CustomerId,
        /// The group to clear.
        shop_id: ShopId,
    },
    /// Apply a guarded patch to an existing order.
    Update {
        /// The order to patch.
        order_id: OrderId,
        /// The guarded patch.
        patch: OrderPatch,
    },
}

/// An atomic read-then-write block.
///
/// See the [module docs](self) for the phase discipline.
#[derive(Debug)]
pub struct UnitOfWork<Phase> {
    reads: Vec<ReadKey>,
    writes: Vec<OrderWrite>,
    _phase: PhantomData<Phase>,
}

impl UnitOfWork<ReadPhase> {
    /// Begins a unit of work in the read phase.
    #[must_use]
    pub const fn begin() -> Self {
        Self {
            reads: Vec::new(),
            writes: Vec::new(),
            _phase: PhantomData,
        }
    }

    /// Records a completed read.
    #[must_use]
    pub fn stage_read(mut self, key: ReadKey) -> Self {
        self.reads.push(key);
        self
    }

    /// Seals the read set; only writes can be staged from here on.
    #[must_use]
    pub fn seal_reads(self) -> UnitOfWork<WritePhase> {
        UnitOfWork {
            reads: self.reads,
            writes: self.writes,
            _phase: PhantomData,
        }
    }
}

impl UnitOfWork<WritePhase> {
    /// Stages a mutation.
    #[must_use]
    pub fn stage_write(mut self, write: OrderWrite) -> Self {
        self.writes.push(write);
        self
    }

    /// The sealed read set, for conflict detection.
    #[must_use]
    pub fn reads(&self) -> &[ReadKey] {
        &self.reads
    }

    /// The staged writes, in staging order.
    #[must_use]
    pub fn writes(&self) -> &[OrderWrite] {
        &self.writes
    }

    /// Consumes the unit, yielding the writes for application.
    #[must_use]
    pub fn into_writes(self) -> Vec<OrderWrite> {
        self.writes
    }
}

impl Default for UnitOfWork<ReadPhase> {
    fn default() -> Self {
        Self::begin()
    }
}
