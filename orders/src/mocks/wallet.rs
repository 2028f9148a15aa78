//! Mock wallet service for testing.

use crate::error::{OrderError, Result};
use crate::providers::WalletService;
use crate::types::{Order, OrderId};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Recorder mock for the wallet / payout service.
#[derive(Debug, Clone, Default)]
pub struct MockWalletService {
    payouts: Arc<Mutex<Vec<OrderId>>>,
    failing: Arc<Mutex<bool>>,
}

impl MockWalletService {
    /// Create a succeeding mock wallet service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut f) = self.failing.lock() {
            *f = failing;
        }
    }

    /// Order ids payouts were requested for, in order.
    #[must_use]
    pub fn payouts(&self) -> Vec<OrderId> {
        self.payouts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl WalletService for MockWalletService {
    fn process_order_payout(&self, order: &Order) -> impl Future<Output = Result<()>> + Send {
        let failing = self.failing.lock().map(|f| *f).unwrap_or(false);
        if let Ok(mut payouts) = self.payouts.lock() {
            payouts.push(order.id.clone());
        }
        async move {
            if failing {
                Err(OrderError::StoreError("wallet service unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }
}
