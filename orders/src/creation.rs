//! Atomic order creation.
//!
//! Builds an order from a consistent read of cart, shop, product and address
//! state, then persists the insert and the cart-group clear in one unit of
//! work. The read phase completes in full before the first write is staged;
//! the [`UnitOfWork`] typestate makes interleaving impossible to express.

use crate::address::{resolve_delivery_address, DeliveryDetails};
use crate::constants::ORDER_NUMBER_SUFFIX_LEN;
use crate::environment::OrderEnvironment;
use crate::error::{OrderError, Result};
use crate::providers::{
    AddressReader, BuyerStatsService, CartGroup, CartReader, InventoryWriter, OrderStore,
    ProductReader, ShopReader, WalletService,
};
use crate::types::{
    CustomerId, Money, Order, OrderId, OrderItem, OrderStatus, PartySnapshot, PaymentMethod,
    PaymentStatus,
};
use crate::unit_of_work::{OrderWrite, ReadKey, UnitOfWork};
use chrono::{DateTime, Utc};
use rand::Rng;

/// A validated order-creation request.
#[derive(Clone, Debug)]
pub struct CreateOrderRequest {
    /// The shop whose cart group becomes the order.
    pub shop_id: crate::types::ShopId,
    /// Delivery address input (saved reference or inline snapshot).
    pub delivery: DeliveryDetails,
    /// Opaque payment method label.
    pub payment_method: PaymentMethod,
    /// Pre-validated discount amount (voucher validation is external).
    pub discount: Money,
    /// Customer contact snapshot, when the caller has one at hand.
    pub customer_snapshot: Option<PartySnapshot>,
}

/// Creates an order from the customer's cart group for the requested shop.
///
/// All preconditions are validated on pre-fetched reads before any write is
/// staged; on success exactly one order is inserted with status `PENDING`
/// and the matching cart group is cleared in the same atomic unit of work.
///
/// # Errors
///
/// - [`OrderError::EmptyCart`] — no non-empty cart group for the shop.
/// - [`OrderError::ShopNotFound`] / [`OrderError::ShopClosed`] — shop
///   missing or not accepting orders.
/// - [`OrderError::ProductNotFound`] / [`OrderError::ProductUnavailable`] —
///   any failing line aborts the whole operation.
/// - Address errors per [`resolve_delivery_address`].
/// - [`OrderError::TransactionFailed`] — the store rejected the atomic
///   write; no partial state exists and the caller may retry.
pub async fn create_order<C, P, S, A, I, W, B, O>(
    env: &OrderEnvironment<C, P, S, A, I, W, B, O>,
    customer_id: &CustomerId,
    request: CreateOrderRequest,
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
    // ── Read phase: everything fetched before any write is staged ──

    let cart = env.carts.get_cart_grouped(customer_id).await?;
    let group = cart
        .group_for(&request.shop_id)
        .filter(|g| !g.items.is_empty())
        .ok_or_else(|| OrderError::EmptyCart {
            shop_id: request.shop_id.clone(),
        })?;

    let shop = env
        .shops
        .find_by_id(&request.shop_id)
        .await?
        .ok_or_else(|| OrderError::ShopNotFound {
            shop_id: request.shop_id.clone(),
        })?;
    if !shop.accepts_orders() {
        return Err(OrderError::ShopClosed {
            shop_id: request.shop_id.clone(),
        });
    }

    let mut uow = UnitOfWork::begin()
        .stage_read(ReadKey::Cart(customer_id.clone()))
        .stage_read(ReadKey::Shop(request.shop_id.clone()));

    for line in &group.items {
        let product = env
            .products
            .find_by_id(&line.product_id)
            .await?
            .ok_or_else(|| OrderError::ProductNotFound {
                product_id: line.product_id.clone(),
            })?;
        if !product.is_orderable() {
            return Err(OrderError::ProductUnavailable {
                product_id: line.product_id.clone(),
            });
        }
        uow = uow.stage_read(ReadKey::Product(line.product_id.clone()));
    }

    let delivery_address =
        resolve_delivery_address(&env.addresses, customer_id, &request.delivery).await?;
    if let Some(address_id) = &request.delivery.delivery_address_id {
        uow = uow.stage_read(ReadKey::Address(address_id.clone()));
    }

    // ── Build the record from the pre-fetched reads ──

    let now = env.clock.now();
    let items = snapshot_items(group);
    let subtotal: Money = items.iter().map(|i| i.subtotal).sum();
    let ship_fee = shop.ship_fee_per_order;
    let total = subtotal - request.discount + ship_fee;
    let shipper_payout = env.config.shipper_payout(ship_fee);

    let order = Order {
        id: OrderId::new(uuid::Uuid::new_v4().to_string()),
        order_number: generate_order_number(&env.config.order_number_prefix, now),
        customer_id: customer_id.clone(),
        shop_id: request.shop_id.clone(),
        shipper_id: None,
        items,
        subtotal,
        ship_fee,
        discount: request.discount,
        shipper_payout,
        total,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Unpaid,
        payment_method: request.payment_method,
        delivery_address,
        delivery_note: request.delivery.delivery_note.clone(),
        customer_snapshot: request.customer_snapshot,
        shipper_snapshot: None,
        sold_count_applied: false,
        created_at: now,
        updated_at: Some(now),
        confirmed_at: None,
        preparing_at: None,
        ready_at: None,
        shipping_at: None,
        delivered_at: None,
        cancelled_at: None,
    };

    // ── Write phase: insert + cart-group clear, all-or-nothing ──

    let uow = uow
        .seal_reads()
        .stage_write(OrderWrite::Insert(Box::new(order.clone())))
        .stage_write(OrderWrite::ClearCartGroup {
            customer_id: customer_id.clone(),
            shop_id: request.shop_id.clone(),
        });
    env.store.commit(uow).await?;

    tracing::info!(
        order_id = %order.id,
        order_number = %order.order_number,
        %customer_id,
        shop_id = %order.shop_id,
        total = %order.total,
        "order created"
    );

    Ok(order)
}

/// Snapshots cart lines into immutable order items.
fn snapshot_items(group: &CartGroup) -> Vec<OrderItem> {
    group
        .items
        .iter()
        .map(|line| {
            OrderItem::new(
                line.product_id.clone(),
                line.product_name.clone(),
                line.quantity,
                line.price,
            )
        })
        .collect()
}

/// Generates a human-readable order number: `PREFIX-YYYYMMDD-XXXXXX`.
fn generate_order_number(prefix: &str, now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ORDER_NUMBER_SUFFIX_LEN)
        .map(|_| {
            let c = rng.sample(rand::distributions::Alphanumeric) as char;
            c.to_ascii_uppercase()
        })
        .collect();
    format!("{prefix}-{}-{suffix}", now.format("%Y%m%d"))
}
