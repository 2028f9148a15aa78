//! Access-gated detail projections.
//!
//! Owner and shipper detail views share one shape; they differ only in who
//! may fetch them. Views are plain data — wrapping them in a transport
//! envelope is a presentation concern outside this core.

use crate::error::{OrderError, Result};
use crate::projection::ContactDto;
use crate::providers::{require_order, OrderStore};
use crate::types::{
    AddressSnapshot, Money, Order, OrderId, OrderItem, OrderStatus, PaymentMethod, PaymentStatus,
    ShipperId, ShopId,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Full order detail, including customer and shipper contact snapshots.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderDetailDto {
    /// Order identifier.
    pub id: String,
    /// Human-readable order number.
    pub order_number: String,
    /// The ordering customer.
    pub customer_id: String,
    /// The shop.
    pub shop_id: String,
    /// The accepting shipper, if any.
    pub shipper_id: Option<ShipperId>,
    /// Line items.
    pub items: Vec<OrderItem>,
    /// Sum of line subtotals.
    pub subtotal: Money,
    /// Delivery fee.
    pub ship_fee: Money,
    /// Discount applied at creation.
    pub discount: Money,
    /// Payout owed to the shipper.
    pub shipper_payout: Money,
    /// Order total.
    pub total: Money,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// Payment method label.
    pub payment_method: PaymentMethod,
    /// Full address snapshot, note included.
    pub delivery_address: AddressSnapshot,
    /// Customer note override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_note: Option<String>,
    /// Customer contact, when snapshotted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<ContactDto>,
    /// Shipper contact, when snapshotted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipper: Option<ContactDto>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// When the order was delivered, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    /// When the order was cancelled, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderDetailDto {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_str().to_string(),
            order_number: order.order_number.clone(),
            customer_id: order.customer_id.as_str().to_string(),
            shop_id: order.shop_id.as_str().to_string(),
            shipper_id: order.shipper_id.clone(),
            items: order.items.clone(),
            subtotal: order.subtotal,
            ship_fee: order.ship_fee,
            discount: order.discount,
            shipper_payout: order.shipper_payout,
            total: order.total,
            status: order.status,
            payment_status: order.payment_status,
            payment_method: order.payment_method.clone(),
            delivery_address: order.delivery_address.clone(),
            delivery_note: order.delivery_note.clone(),
            customer: order.customer_snapshot.as_ref().map(ContactDto::from),
            shipper: order.shipper_snapshot.as_ref().map(ContactDto::from),
            created_at: order.created_at,
            updated_at: order.updated_at,
            delivered_at: order.delivered_at,
            cancelled_at: order.cancelled_at,
        }
    }
}

/// Returns `true` if `shipper_id` may view this order's detail.
///
/// Visible when the order is assigned to the requester, or when it is an
/// unassigned `READY` order — previewable by any shipper before acceptance.
#[must_use]
pub fn visible_to_shipper(order: &Order, shipper_id: &ShipperId) -> bool {
    match &order.shipper_id {
        Some(assigned) => assigned == shipper_id,
        None => order.status == OrderStatus::Ready,
    }
}

/// Owner-facing detail view, gated by shop ownership.
///
/// # Errors
///
/// - [`OrderError::OrderNotFound`] — no such order.
/// - [`OrderError::OrderAccessDenied`] — the order belongs to another shop.
pub async fn owner_detail<O: OrderStore>(
    store: &O,
    order_id: &OrderId,
    shop_id: &ShopId,
) -> Result<OrderDetailDto> {
    let order = require_order(store, order_id).await?;
    if &order.shop_id != shop_id {
        return Err(OrderError::OrderAccessDenied);
    }
    Ok(OrderDetailDto::from(&order))
}

/// Shipper-facing detail view, gated by assignment or unassigned-`READY`
/// visibility.
///
/// # Errors
///
/// - [`OrderError::OrderNotFound`] — no such order.
/// - [`OrderError::OrderAccessDenied`] — neither assigned to the requester
///   nor an unassigned `READY` order.
pub async fn shipper_detail<O: OrderStore>(
    store: &O,
    order_id: &OrderId,
    shipper_id: &ShipperId,
) -> Result<OrderDetailDto> {
    let order = require_order(store, order_id).await?;
    if !visible_to_shipper(&order, shipper_id) {
        return Err(OrderError::OrderAccessDenied);
    }
    Ok(OrderDetailDto::from(&order))
}
