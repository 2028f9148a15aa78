//! Delivery completion side effects.
//!
//! Runs when a `SHIPPING → DELIVERED` transition is accepted, and again on
//! at-least-once redelivery of the same event. The persisted
//! `sold_count_applied` flag is the single source of truth preventing
//! double-counting; no lock manager is involved. Inventory, payout and
//! buyer-stats calls are best-effort: the delivery confirmation is the
//! durable fact, and a failure in any side effect is logged and swallowed,
//! never surfaced to the caller.

use crate::environment::OrderEnvironment;
use crate::error::{OrderError, Result};
use crate::providers::{
    require_order, AddressReader, BuyerStatsService, CartReader, InventoryWriter, OrderStore,
    ProductReader, ShopReader, SoldCountDelta, WalletService,
};
use crate::transitions::commit_patch;
use crate::types::{Order, OrderId, OrderItem, OrderStatus};
use crate::unit_of_work::OrderPatch;
use std::collections::HashMap;

/// Completes a delivery: applies the one-time inventory side effect, then
/// persists the terminal status together with the guard flag, then fires
/// the payout and buyer-stats updates.
///
/// Safe to invoke more than once for the same delivery event: a re-run
/// sees `sold_count_applied == true`, skips the inventory increment and
/// the guarded write, and only re-fires the downstream calls (which carry
/// their own idempotence markers).
///
/// # Errors
///
/// - [`OrderError::OrderNotFound`] — no such order.
/// - [`OrderError::InvalidTransition`] — the order is in neither
///   `SHIPPING` nor `DELIVERED`.
/// - [`OrderError::Conflict`] / [`OrderError::TransactionFailed`] — the
///   guarded terminal write lost a race or was rejected; no partial state
///   exists.
///
/// Inventory, payout and stats failures are **not** errors here.
pub async fn complete_delivery<C, P, S, A, I, W, B, O>(
    env: &OrderEnvironment<C, P, S, A, I, W, B, O>,
    order_id: &OrderId,
) -> Result<Order>
where
    C: CartReader + Clone,
    P: ProductReader + Clone,
    S: ShopReader + Clone,
    A: AddressReader + Clone,
    I: InventoryWriter + Clone,
    W: WalletService + Clone,
    B: BuyerStatsService + Clone,
    O: OrderStore + Clone,
{
    // Authoritative re-fetch: the item list and guard flag must come from
    // the store, not from whatever the caller holds.
    let order = require_order(&env.store, order_id).await?;
    if order.status != OrderStatus::Shipping && order.status != OrderStatus::Delivered {
        return Err(OrderError::InvalidTransition {
            from: order.status,
            to: OrderStatus::Delivered,
        });
    }

    if order.sold_count_applied {
        tracing::debug!(%order_id, "sold counts already applied, skipping increment");
    } else {
        let deltas = aggregate_sold_counts(&order.items);
        if let Err(error) = env.inventory.increment_sold_count(deltas).await {
            tracing::warn!(
                %order_id,
                %error,
                "sold-count increment failed, continuing delivery"
            );
        }

        // The flag, the timestamp and the terminal status land together, so
        // a retried completion sees the guard and no-ops on the count.
        let mut patch = OrderPatch::at(env.clock.now())
            .with_sold_count_applied(true)
            .expect_status(order.status)
            .expect_sold_count_applied(false);
        if order.status == OrderStatus::Shipping {
            patch = patch.with_status(OrderStatus::Delivered);
        }
        commit_patch(&env.store, order_id, patch).await?;
    }

    let order = require_order(&env.store, order_id).await?;

    if let Err(error) = env.wallet.process_order_payout(&order).await {
        tracing::error!(%order_id, %error, "shipper payout processing failed");
    }
    if let Err(error) = env.stats.update_buyer_stats_on_delivery(&order).await {
        tracing::error!(%order_id, %error, "buyer stats update failed");
    }

    Ok(order)
}

/// Aggregates per-product quantities across all order lines.
///
/// Zero-quantity lines are kept as explicit no-op entries rather than
/// filtered out; the inventory service receives them unchanged. First-seen
/// product order is preserved.
fn aggregate_sold_counts(items: &[OrderItem]) -> Vec<SoldCountDelta> {
    let mut deltas: Vec<SoldCountDelta> = Vec::new();
    let mut index: HashMap<&crate::types::ProductId, usize> = HashMap::new();

    for item in items {
        if let Some(&i) = index.get(&item.product_id) {
            deltas[i].quantity += item.quantity;
        } else {
            index.insert(&item.product_id, deltas.len());
            deltas.push(SoldCountDelta {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            });
        }
    }
    deltas
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::types::{Money, ProductId};

    fn item(product: &str, quantity: u32) -> OrderItem {
        OrderItem::new(
            ProductId::from(product),
            product.to_string(),
            quantity,
            Money::from_minor(10_000),
        )
    }

    #[test]
    fn aggregation_sums_repeated_products() {
        let deltas = aggregate_sold_counts(&[item("prod_1", 2), item("prod_1", 3), item("prod_2", 1)]);
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].product_id, ProductId::from("prod_1"));
        assert_eq!(deltas[0].quantity, 5);
        assert_eq!(deltas[1].quantity, 1);
    }

    #[test]
    fn zero_quantity_lines_pass_through() {
        let deltas = aggregate_sold_counts(&[item("prod_1", 0), item("prod_2", 4)]);
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].quantity, 0);
    }

    #[test]
    fn empty_items_yield_empty_deltas() {
        assert!(aggregate_sold_counts(&[]).is_empty());
    }
}
