//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use crate::types::{
    AddressSnapshot, CustomerId, Money, Order, OrderId, OrderItem, OrderStatus, PaymentStatus,
    ProductId, ShopId,
};
use chrono::{TimeZone, Utc};

/// A freshly created PENDING order with one line item.
pub fn pending_order() -> Order {
    let created_at = Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap();
    let items = vec![OrderItem::new(
        ProductId::from("prod_1"),
        "Iced coffee".to_string(),
        2,
        Money::from_minor(50_000),
    )];
    let subtotal: Money = items.iter().map(|i| i.subtotal).sum();
    let ship_fee = Money::from_minor(5_000);

    Order {
        id: OrderId::from("order_1"),
        order_number: "ZM-20260824-TESTAA".to_string(),
        customer_id: CustomerId::from("customer_1"),
        shop_id: ShopId::from("shop_1"),
        shipper_id: None,
        subtotal,
        ship_fee,
        discount: Money::ZERO,
        shipper_payout: Money::from_minor(4_000),
        total: subtotal + ship_fee,
        items,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Unpaid,
        payment_method: "cash".into(),
        delivery_address: AddressSnapshot {
            label: Some("Home".to_string()),
            full_address: "12 Alley 5, District 1".to_string(),
            building: Some("B2".to_string()),
            room: Some("304".to_string()),
            note: None,
        },
        delivery_note: None,
        customer_snapshot: None,
        shipper_snapshot: None,
        sold_count_applied: false,
        created_at,
        updated_at: Some(created_at),
        confirmed_at: None,
        preparing_at: None,
        ready_at: None,
        shipping_at: None,
        delivered_at: None,
        cancelled_at: None,
    }
}

/// A PENDING order with `n` distinct line items (`prod_0` .. `prod_{n-1}`).
pub fn order_with_items(n: usize) -> Order {
    let mut order = pending_order();
    order.items = (0..n)
        .map(|i| {
            OrderItem::new(
                ProductId::new(format!("prod_{i}")),
                format!("Item {i}"),
                1,
                Money::from_minor(10_000),
            )
        })
        .collect();
    order.subtotal = order.items.iter().map(|i| i.subtotal).sum();
    order.total = order.subtotal - order.discount + order.ship_fee;
    order
}
