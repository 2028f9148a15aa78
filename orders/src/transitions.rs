//! Guarded order status transitions.
//!
//! Every mutation here follows the same shape: fetch the current record,
//! validate against the state machine, then commit a guarded patch whose
//! `expected_status` pins the record the decision was made on. A losing
//! concurrent writer observes a conflict, never a silent overwrite.

use crate::completion::complete_delivery;
use crate::environment::OrderEnvironment;
use crate::error::{OrderError, Result};
use crate::providers::{
    require_order, AddressReader, BuyerStatsService, CartReader, InventoryWriter, OrderStore,
    ProductReader, ShopReader, WalletService,
};
use crate::state_machine::OrderStateMachine;
use crate::types::{Order, OrderId, OrderStatus, PartySnapshot, PaymentStatus, ShipperId};
use crate::unit_of_work::{OrderPatch, OrderWrite, ReadKey, UnitOfWork};

/// Moves an order along the transition graph.
///
/// `SHIPPING → DELIVERED` additionally runs the delivery completion
/// handler, which owns the terminal write and its side effects.
///
/// # Errors
///
/// - [`OrderError::OrderNotFound`] — no such order.
/// - [`OrderError::InvalidTransition`] — the edge is not in the graph.
/// - [`OrderError::Conflict`] — a concurrent writer moved the order first.
pub async fn update_status<C, P, S, A, I, W, B, O>(
    env: &OrderEnvironment<C, P, S, A, I, W, B, O>,
    order_id: &OrderId,
    requested: OrderStatus,
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
    let order = require_order(&env.store, order_id).await?;
    OrderStateMachine::validate_transition(order.status, requested)?;

    if requested == OrderStatus::Delivered {
        return complete_delivery(env, order_id).await;
    }

    let patch = OrderPatch::at(env.clock.now())
        .with_status(requested)
        .expect_status(order.status);
    commit_patch(&env.store, order_id, patch.clone()).await?;

    let mut updated = order;
    patch.apply_to(&mut updated)?;
    tracing::debug!(%order_id, status = %requested, "order status updated");
    Ok(updated)
}

/// A shipper claims an unassigned `READY` order.
///
/// Sets the shipper, captures the contact snapshot at this moment, and
/// performs the `READY → SHIPPING` transition in one guarded write.
///
/// # Errors
///
/// - [`OrderError::OrderNotFound`] — no such order.
/// - [`OrderError::OrderAccessDenied`] — the order is already assigned to
///   another shipper.
/// - [`OrderError::InvalidTransition`] — the order is not `READY`.
pub async fn accept_order<C, P, S, A, I, W, B, O>(
    env: &OrderEnvironment<C, P, S, A, I, W, B, O>,
    order_id: &OrderId,
    shipper_id: &ShipperId,
    shipper_snapshot: Option<PartySnapshot>,
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
    let order = require_order(&env.store, order_id).await?;
    if let Some(assigned) = &order.shipper_id {
        if assigned != shipper_id {
            return Err(OrderError::OrderAccessDenied);
        }
    }
    OrderStateMachine::validate_transition(order.status, OrderStatus::Shipping)?;

    let patch = OrderPatch::at(env.clock.now())
        .with_status(OrderStatus::Shipping)
        .with_shipper(shipper_id.clone(), shipper_snapshot)
        .expect_status(order.status);
    commit_patch(&env.store, order_id, patch.clone()).await?;

    let mut updated = order;
    patch.apply_to(&mut updated)?;
    tracing::info!(%order_id, %shipper_id, "order accepted by shipper");
    Ok(updated)
}

/// Marks an order as paid, independently of its delivery status.
///
/// # Errors
///
/// - [`OrderError::OrderNotFound`] — no such order.
/// - [`OrderError::PaymentAlreadyMarked`] — already `PAID`.
pub async fn mark_paid<C, P, S, A, I, W, B, O>(
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
    let order = require_order(&env.store, order_id).await?;
    if order.payment_status == PaymentStatus::Paid {
        return Err(OrderError::PaymentAlreadyMarked);
    }

    let patch = OrderPatch::at(env.clock.now()).with_payment_status(PaymentStatus::Paid);
    commit_patch(&env.store, order_id, patch.clone()).await?;

    let mut updated = order;
    patch.apply_to(&mut updated)?;
    tracing::debug!(%order_id, "order marked as paid");
    Ok(updated)
}

/// Commits a single-order guarded patch as its own unit of work.
pub(crate) async fn commit_patch<O: OrderStore>(
    store: &O,
    order_id: &OrderId,
    patch: OrderPatch,
) -> Result<()> {
    let uow = UnitOfWork::begin()
        .stage_read(ReadKey::Order(order_id.clone()))
        .seal_reads()
        .stage_write(OrderWrite::Update {
            order_id: order_id.clone(),
            patch,
        });
    store.commit(uow).await
}
