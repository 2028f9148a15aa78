//! Transactional order store interface.

use crate::error::{OrderError, Result};
use crate::types::{Order, OrderId};
use crate::unit_of_work::{UnitOfWork, WritePhase};

/// The transactional store holding order records (and the cart documents
/// the creation transaction clears).
///
/// `commit` applies a sealed unit of work atomically: either every staged
/// write lands or none does. A guard failure inside a staged patch aborts
/// the whole unit with [`OrderError::Conflict`]; any other rejection
/// surfaces as [`OrderError::TransactionFailed`] with no partial state.
pub trait OrderStore: Send + Sync {
    /// Look up an order by id; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    async fn find_by_id(&self, order_id: &OrderId) -> Result<Option<Order>>;

    /// Atomically apply a sealed unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Conflict`] if a patch guard failed, or
    /// [`OrderError::TransactionFailed`] if the store rejected the
    /// transaction. In both cases no partial state exists and the caller
    /// may retry from a fresh read.
    async fn commit(&self, uow: UnitOfWork<WritePhase>) -> Result<()>;
}

/// Fetches an order that must exist.
///
/// # Errors
///
/// Returns [`OrderError::OrderNotFound`] if the id resolves to nothing,
/// or the store's own error if it is unreachable.
pub async fn require_order<O: OrderStore>(store: &O, order_id: &OrderId) -> Result<Order> {
    store
        .find_by_id(order_id)
        .await?
        .ok_or(OrderError::OrderNotFound)
}
