//! The authoritative set of legal order status transitions.
//!
//! The transition graph is encoded as a static adjacency table on a closed
//! enum, so every (from, to) pair is mechanically enumerable. The machine is
//! a pure validator: it performs no I/O and mutates nothing; callers consult
//! it before every status-changing write.

use crate::error::{OrderError, Result};
use crate::types::OrderStatus;

/// Pure validator for order status transitions.
///
/// ```text
/// PENDING    -> CONFIRMED, CANCELLED
/// CONFIRMED  -> PREPARING, CANCELLED
/// PREPARING  -> READY, CANCELLED
/// READY      -> SHIPPING, CANCELLED
/// SHIPPING   -> DELIVERED
/// ```
///
/// `DELIVERED` and `CANCELLED` are terminal. Transitions are strictly
/// forward: requesting the current status again is rejected, not a no-op.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// All statuses, for exhaustive enumeration in tests and tooling.
    pub const ALL_STATUSES: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// The statuses reachable from `from` in one legal transition.
    #[must_use]
    pub const fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
        match from {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::Ready, OrderStatus::Cancelled],
            OrderStatus::Ready => &[OrderStatus::Shipping, OrderStatus::Cancelled],
            OrderStatus::Shipping => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    /// Returns `true` if `from -> to` is an edge of the transition graph.
    #[must_use]
    pub const fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
        let targets = Self::allowed_targets(from);
        let mut i = 0;
        while i < targets.len() {
            if targets[i] as u8 == to as u8 {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Returns `true` if no transition leaves `status`.
    #[must_use]
    pub const fn is_terminal(status: OrderStatus) -> bool {
        Self::allowed_targets(status).is_empty()
    }

    /// Validates a requested transition.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] identifying both statuses
    /// when `current -> requested` is not an edge of the graph, including
    /// when `requested == current`.
    pub const fn validate_transition(current: OrderStatus, requested: OrderStatus) -> Result<()> {
        if Self::can_transition(current, requested) {
            Ok(())
        } else {
            Err(OrderError::InvalidTransition {
                from: current,
                to: requested,
            })
        }
    }
}
