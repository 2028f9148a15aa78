//! Mock buyer-stats service for testing.

use crate::error::{OrderError, Result};
use crate::providers::BuyerStatsService;
use crate::types::{Order, OrderId};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Recorder mock for the buyer statistics service.
#[derive(Debug, Clone, Default)]
pub struct MockBuyerStatsService {
    updates: Arc<Mutex<Vec<OrderId>>>,
    failing: Arc<Mutex<bool>>,
}

impl MockBuyerStatsService {
    /// Create a succeeding mock stats service.
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

    /// Order ids stats updates were requested for, in order.
    #[must_use]
    pub fn updates(&self) -> Vec<OrderId> {
        self.updates.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

impl BuyerStatsService for MockBuyerStatsService {
    fn update_buyer_stats_on_delivery(
        &self,
        order: &Order,
    ) -> impl Future<Output = Result<()>> + Send {
        let failing = self.failing.lock().map(|f| *f).unwrap_or(false);
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(order.id.clone());
        }
        async move {
            if failing {
                Err(OrderError::StoreError("stats service unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }
}
