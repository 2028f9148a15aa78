//! Role-agnostic list projection of persisted orders.
//!
//! [`map_to_list_dto`] is a pure function, no I/O: it resolves denormalized
//! party snapshots with a map-based fallback for legacy records created
//! before snapshotting was introduced. The fallback is a compatibility
//! shim, not a steady-state path.

use crate::constants::ITEMS_PREVIEW_LIMIT;
use crate::types::{CustomerId, Money, Order, OrderItem, OrderStatus, PartySnapshot, PaymentMethod, ShipperId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Contact card for a customer or shipper on a read view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactDto {
    /// Party id.
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Phone, only when the source defined one (omitted, not null).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&PartySnapshot> for ContactDto {
    fn from(snapshot: &PartySnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            display_name: snapshot.display_name.clone(),
            phone: snapshot.phone.clone(),
        }
    }
}

/// List-view address projection.
///
/// Deliberately excludes the `note` field; notes are only shown on detail
/// views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListAddressDto {
    /// Optional label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Full street address.
    pub full_address: String,
    /// Optional building.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    /// Optional room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// One order row in a list view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderListDto {
    /// Order identifier.
    pub id: String,
    /// Human-readable order number.
    pub order_number: String,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Order total.
    pub total: Money,
    /// First items, at most [`ITEMS_PREVIEW_LIMIT`], in original order.
    pub items_preview: Vec<OrderItem>,
    /// `min(ITEMS_PREVIEW_LIMIT, item_count)`.
    pub items_preview_count: usize,
    /// Total number of items, not the preview length.
    pub item_count: usize,
    /// Customer contact; omitted when unresolvable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<ContactDto>,
    /// Shipper contact; omitted when unresolvable or unassigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipper: Option<ContactDto>,
    /// Shipper id passed through as-is: `null` stays `null`, since callers
    /// distinguish "no shipper" from "field not requested".
    pub shipper_id: Option<ShipperId>,
    /// Stripped delivery address.
    pub delivery_address: ListAddressDto,
    /// Payment method, passed through unchanged.
    pub payment_method: PaymentMethod,
    /// Ship fee, passed through unchanged.
    pub ship_fee: Money,
    /// Creation time, ISO-8601 with millisecond precision.
    pub created_at: String,
    /// Last mutation time; omitted for legacy records without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Serializes a timestamp as ISO-8601 with millisecond precision.
fn iso_millis(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Maps a persisted order into its list row.
///
/// Party resolution priority: the order's own snapshot, else a lookup in
/// the caller-supplied map, else absent. When `shipper_id` is `None` the
/// shipper contact is absent regardless of maps.
#[must_use]
pub fn map_to_list_dto(
    order: &Order,
    shipper_map: Option<&HashMap<ShipperId, PartySnapshot>>,
    customer_map: Option<&HashMap<CustomerId, PartySnapshot>>,
) -> OrderListDto {
    let customer = order
        .customer_snapshot
        .as_ref()
        .map(ContactDto::from)
        .or_else(|| {
            customer_map
                .and_then(|m| m.get(&order.customer_id))
                .map(ContactDto::from)
        });

    let shipper = order.shipper_id.as_ref().and_then(|shipper_id| {
        order
            .shipper_snapshot
            .as_ref()
            .map(ContactDto::from)
            .or_else(|| {
                shipper_map
                    .and_then(|m| m.get(shipper_id))
                    .map(ContactDto::from)
            })
    });

    OrderListDto {
        id: order.id.as_str().to_string(),
        order_number: order.order_number.clone(),
        status: order.status,
        total: order.total,
        items_preview: order.items.iter().take(ITEMS_PREVIEW_LIMIT).cloned().collect(),
        items_preview_count: order.items.len().min(ITEMS_PREVIEW_LIMIT),
        item_count: order.items.len(),
        customer,
        shipper,
        shipper_id: order.shipper_id.clone(),
        delivery_address: ListAddressDto {
            label: order.delivery_address.label.clone(),
            full_address: order.delivery_address.full_address.clone(),
            building: order.delivery_address.building.clone(),
            room: order.delivery_address.room.clone(),
        },
        payment_method: order.payment_method.clone(),
        ship_fee: order.ship_fee,
        created_at: iso_millis(order.created_at),
        updated_at: order.updated_at.map(iso_millis),
    }
}
