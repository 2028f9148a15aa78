//! Integration tests for delivery completion and its one-time side effects.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use zipmart_orders::completion::complete_delivery;
use zipmart_orders::environment::OrderEnvironment;
use zipmart_orders::mocks::{
    FixedClock, InMemoryOrderStore, MockAddressReader, MockBuyerStatsService, MockCartReader,
    MockInventoryWriter, MockProductReader, MockShopReader, MockWalletService,
};
use zipmart_orders::transitions::update_status;
use zipmart_orders::types::{
    AddressSnapshot, CustomerId, Money, Order, OrderId, OrderItem, OrderStatus, PartySnapshot,
    PaymentStatus, ProductId, ShipperId, ShopId,
};
use zipmart_orders::OrdersConfig;

type TestEnv = OrderEnvironment<
    MockCartReader,
    MockProductReader,
    MockShopReader,
    MockAddressReader,
    MockInventoryWriter,
    MockWalletService,
    MockBuyerStatsService,
    InMemoryOrderStore,
>;

fn test_env() -> TestEnv {
    OrderEnvironment::new(
        MockCartReader::new(),
        MockProductReader::new(),
        MockShopReader::new(),
        MockAddressReader::new(),
        MockInventoryWriter::new(),
        MockWalletService::new(),
        MockBuyerStatsService::new(),
        InMemoryOrderStore::new(),
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap(),
        )),
        OrdersConfig::default(),
    )
}

fn line(product: &str, quantity: u32) -> OrderItem {
    OrderItem::new(
        ProductId::from(product),
        product.to_string(),
        quantity,
        Money::from_minor(10_000),
    )
}

/// An order mid-delivery, as it would be after a shipper accepted it.
fn shipping_order(items: Vec<OrderItem>) -> Order {
    let created_at = Utc.with_ymd_and_hms(2026, 8, 24, 11, 0, 0).unwrap();
    let subtotal: Money = items.iter().map(|i| i.subtotal).sum();
    let ship_fee = Money::from_minor(5_000);

    Order {
        id: OrderId::from("order_1"),
        order_number: "ZM-20260824-TESTAA".to_string(),
        customer_id: CustomerId::from("customer_1"),
        shop_id: ShopId::from("shop_1"),
        shipper_id: Some(ShipperId::from("shipper_1")),
        subtotal,
        ship_fee,
        discount: Money::ZERO,
        shipper_payout: Money::from_minor(4_000),
        total: subtotal + ship_fee,
        items,
        status: OrderStatus::Shipping,
        payment_status: PaymentStatus::Unpaid,
        payment_method: "cash".into(),
        delivery_address: AddressSnapshot {
            label: None,
            full_address: "12 Alley 5, District 1".to_string(),
            building: None,
            room: None,
            note: None,
        },
        delivery_note: None,
        customer_snapshot: None,
        shipper_snapshot: Some(PartySnapshot {
            id: "shipper_1".to_string(),
            display_name: "Shipper One".to_string(),
            phone: None,
        }),
        sold_count_applied: false,
        created_at,
        updated_at: Some(created_at),
        confirmed_at: Some(created_at),
        preparing_at: Some(created_at),
        ready_at: Some(created_at),
        shipping_at: Some(created_at),
        delivered_at: None,
        cancelled_at: None,
    }
}

#[tokio::test]
async fn completion_increments_sold_counts_once_per_line() {
    let env = test_env();
    let order = shipping_order(vec![line("prod_1", 2), line("prod_2", 5), line("prod_3", 1)]);
    env.store.seed(order.clone());

    let delivered = update_status(&env, &order.id, OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.sold_count_applied);
    assert!(delivered.delivered_at.is_some());

    let calls = env.inventory.calls();
    assert_eq!(calls.len(), 1);
    let pairs: Vec<(String, u32)> = calls[0]
        .iter()
        .map(|d| (d.product_id.as_str().to_string(), d.quantity))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("prod_1".to_string(), 2),
            ("prod_2".to_string(), 5),
            ("prod_3".to_string(), 1),
        ]
    );

    // Terminal state and guard flag are persisted together.
    let stored = env.store.get(&order.id).unwrap();
    assert_eq!(stored.status, OrderStatus::Delivered);
    assert!(stored.sold_count_applied);
}

#[tokio::test]
async fn repeated_lines_are_aggregated_into_one_delta() {
    let env = test_env();
    let order = shipping_order(vec![line("prod_1", 2), line("prod_1", 3)]);
    env.store.seed(order.clone());

    complete_delivery(&env, &order.id).await.unwrap();

    let calls = env.inventory.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert_eq!(calls[0][0].quantity, 5);
}

#[tokio::test]
async fn zero_quantity_lines_are_passed_through_unchanged() {
    let env = test_env();
    let order = shipping_order(vec![line("prod_1", 0), line("prod_2", 4)]);
    env.store.seed(order.clone());

    complete_delivery(&env, &order.id).await.unwrap();

    let calls = env.inventory.calls();
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[0][0].quantity, 0);
    assert_eq!(calls[0][1].quantity, 4);
}

#[tokio::test]
async fn redelivered_completion_does_not_double_count() {
    let env = test_env();
    let order = shipping_order(vec![line("prod_1", 2)]);
    env.store.seed(order.clone());

    complete_delivery(&env, &order.id).await.unwrap();
    // Same event, delivered again.
    let second = complete_delivery(&env, &order.id).await.unwrap();

    assert_eq!(env.inventory.call_count(), 1);
    assert_eq!(second.status, OrderStatus::Delivered);
    assert!(second.sold_count_applied);
}

#[tokio::test]
async fn already_flagged_order_skips_the_increment_entirely() {
    let env = test_env();
    let mut order = shipping_order(vec![line("prod_1", 2)]);
    order.status = OrderStatus::Delivered;
    order.sold_count_applied = true;
    env.store.seed(order.clone());

    complete_delivery(&env, &order.id).await.unwrap();
    assert_eq!(env.inventory.call_count(), 0);
}

#[tokio::test]
async fn downstream_calls_refire_on_redelivery() {
    let env = test_env();
    let order = shipping_order(vec![line("prod_1", 2)]);
    env.store.seed(order.clone());

    complete_delivery(&env, &order.id).await.unwrap();
    complete_delivery(&env, &order.id).await.unwrap();

    // Payout and stats carry their own idempotence markers downstream, so
    // they are re-fired; only the sold count is guarded here.
    assert_eq!(env.wallet.payouts().len(), 2);
    assert_eq!(env.stats.updates().len(), 2);
    assert_eq!(env.inventory.call_count(), 1);
}

#[tokio::test]
async fn inventory_failure_does_not_block_delivery() {
    let env = test_env();
    let order = shipping_order(vec![line("prod_1", 2)]);
    env.store.seed(order.clone());
    env.inventory.set_failing(true);

    let delivered = complete_delivery(&env, &order.id).await.unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    // The flag still flips: the increment was attempted, and this event
    // must not be re-applied on redelivery.
    assert!(delivered.sold_count_applied);
    assert_eq!(env.wallet.payouts().len(), 1);
}

#[tokio::test]
async fn wallet_failure_is_swallowed_and_stats_still_run() {
    let env = test_env();
    let order = shipping_order(vec![line("prod_1", 2)]);
    env.store.seed(order.clone());
    env.wallet.set_failing(true);

    let delivered = complete_delivery(&env, &order.id).await.unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(env.stats.updates(), vec![order.id.clone()]);
}

#[tokio::test]
async fn stats_failure_is_swallowed() {
    let env = test_env();
    let order = shipping_order(vec![line("prod_1", 2)]);
    env.store.seed(order.clone());
    env.stats.set_failing(true);

    assert!(complete_delivery(&env, &order.id).await.is_ok());
    assert_eq!(env.wallet.payouts().len(), 1);
}

#[tokio::test]
async fn all_side_effects_failing_still_delivers() {
    let env = test_env();
    let order = shipping_order(vec![line("prod_1", 2)]);
    env.store.seed(order.clone());
    env.inventory.set_failing(true);
    env.wallet.set_failing(true);
    env.stats.set_failing(true);

    let delivered = complete_delivery(&env, &order.id).await.unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(env.store.get(&order.id).unwrap().status, OrderStatus::Delivered);
}

#[tokio::test]
async fn completion_from_a_non_shipping_state_is_rejected() {
    let env = test_env();
    let mut order = shipping_order(vec![line("prod_1", 2)]);
    order.status = OrderStatus::Ready;
    order.shipper_id = None;
    env.store.seed(order.clone());

    let err = complete_delivery(&env, &order.id).await.unwrap_err();
    assert_eq!(err.code(), "INVALID_TRANSITION");
    assert_eq!(env.inventory.call_count(), 0);
    assert!(env.wallet.payouts().is_empty());
}

#[tokio::test]
async fn completion_of_a_missing_order_is_not_found() {
    let env = test_env();
    let err = complete_delivery(&env, &OrderId::from("order_missing"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ORDER_NOT_FOUND");
}
