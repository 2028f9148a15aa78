//! In-memory transactional order store for testing.

use crate::error::{OrderError, Result};
use crate::mocks::MockCartReader;
use crate::providers::OrderStore;
use crate::types::{CustomerId, Order, OrderId, ShopId};
use crate::unit_of_work::{OrderWrite, UnitOfWork, WritePhase};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory order store.
///
/// Applies sealed units of work all-or-nothing: writes are staged against a
/// copy of the order map and swapped in only if every write (and every
/// patch guard) succeeds. Cart-group clears are recorded, and applied to a
/// shared [`MockCartReader`] when one is attached, so tests observe the
/// atomic pairing of insert + clear.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<Mutex<HashMap<OrderId, Order>>>,
    cleared_groups: Arc<Mutex<Vec<(CustomerId, ShopId)>>>,
    cart: Option<MockCartReader>,
    failing: Arc<Mutex<bool>>,
}

impl InMemoryOrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a cart reader whose groups committed clears are applied to.
    #[must_use]
    pub fn with_cart(mut self, cart: MockCartReader) -> Self {
        self.cart = Some(cart);
        self
    }

    /// Makes subsequent commits fail with a transaction error.
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut f) = self.failing.lock() {
            *f = failing;
        }
    }

    /// Seeds an order directly, bypassing the transactional path.
    pub fn seed(&self, order: Order) {
        if let Ok(mut orders) = self.orders.lock() {
            orders.insert(order.id.clone(), order);
        }
    }

    /// Current copy of an order, if present.
    #[must_use]
    pub fn get(&self, order_id: &OrderId) -> Option<Order> {
        self.orders
            .lock()
            .ok()
            .and_then(|orders| orders.get(order_id).cloned())
    }

    /// Number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.lock().map(|o| o.len()).unwrap_or(0)
    }

    /// Returns `true` if no orders are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cart groups cleared by committed units of work, in commit order.
    #[must_use]
    pub fn cleared_groups(&self) -> Vec<(CustomerId, ShopId)> {
        self.cleared_groups
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn apply(&self, uow: UnitOfWork<WritePhase>) -> Result<()> {
        if self.failing.lock().map(|f| *f).unwrap_or(false) {
            return Err(OrderError::TransactionFailed(
                "store rejected the transaction".to_string(),
            ));
        }

        let mut orders = self
            .orders
            .lock()
            .map_err(|_| OrderError::StoreError("order map poisoned".to_string()))?;

        // Stage against a copy; swap in only if every write succeeds.
        let mut staged = orders.clone();
        let mut clears: Vec<(CustomerId, ShopId)> = Vec::new();

        for write in uow.into_writes() {
            match write {
                OrderWrite::Insert(order) => {
                    staged.insert(order.id.clone(), *order);
                },
                OrderWrite::ClearCartGroup {
                    customer_id,
                    shop_id,
                } => {
                    clears.push((customer_id, shop_id));
                },
                OrderWrite::Update { order_id, patch } => {
                    let record = staged
                        .get_mut(&order_id)
                        .ok_or(OrderError::OrderNotFound)?;
                    patch.apply_to(record)?;
                },
            }
        }

        *orders = staged;
        drop(orders);

        for (customer_id, shop_id) in clears {
            if let Some(cart) = &self.cart {
                cart.clear_group(&customer_id, &shop_id);
            }
            if let Ok(mut cleared) = self.cleared_groups.lock() {
                cleared.push((customer_id, shop_id));
            }
        }
        Ok(())
    }
}

impl OrderStore for InMemoryOrderStore {
    fn find_by_id(&self, order_id: &OrderId) -> impl Future<Output = Result<Option<Order>>> + Send {
        let found = self.get(order_id);
        async move { Ok(found) }
    }

    fn commit(&self, uow: UnitOfWork<WritePhase>) -> impl Future<Output = Result<()>> + Send {
        let result = self.apply(uow);
        async move { result }
    }
}
