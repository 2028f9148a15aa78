//! Mock inventory writer for testing.

use crate::error::{OrderError, Result};
use crate::providers::{InventoryWriter, SoldCountDelta};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Recorder mock for the inventory writer.
///
/// Captures every `increment_sold_count` call; a failure toggle forces the
/// best-effort error path.
#[derive(Debug, Clone, Default)]
pub struct MockInventoryWriter {
    calls: Arc<Mutex<Vec<Vec<SoldCountDelta>>>>,
    failing: Arc<Mutex<bool>>,
}

impl MockInventoryWriter {
    /// Create a succeeding mock inventory writer.
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

    /// All recorded calls, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<SoldCountDelta>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl InventoryWriter for MockInventoryWriter {
    fn increment_sold_count(
        &self,
        deltas: Vec<SoldCountDelta>,
    ) -> impl Future<Output = Result<()>> + Send {
        let failing = self.failing.lock().map(|f| *f).unwrap_or(false);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(deltas);
        }
        async move {
            if failing {
                Err(OrderError::StoreError(
                    "inventory service unavailable".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }
}
