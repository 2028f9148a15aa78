//! Delivery address resolution.
//!
//! An order carries exactly one immutable address snapshot, produced here
//! from either a saved-address reference or an inline snapshot. Resolution
//! priority is strict: a saved-address id always wins, and when it is
//! present the inline snapshot is ignored entirely — no merge.

use crate::error::{OrderError, Result};
use crate::providers::AddressReader;
use crate::types::{AddressId, AddressSnapshot, CustomerId};

/// Delivery address input on an order request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryDetails {
    /// Reference to a saved address. Takes priority when present.
    pub delivery_address_id: Option<AddressId>,
    /// Inline snapshot, used verbatim when no saved reference is given.
    pub delivery_address: Option<AddressSnapshot>,
    /// Request-level note; always overrides the resolved snapshot's own note.
    pub delivery_note: Option<String>,
}

/// Resolves the delivery address for an order.
///
/// Priority, first match wins:
/// 1. `delivery_address_id` — looked up and ownership-checked; the snapshot
///    is copied from the saved record.
/// 2. `delivery_address` — used verbatim, with zero calls to the address
///    store.
/// 3. Neither — the request is invalid.
///
/// A request-level `delivery_note` overrides the snapshot's `note` field
/// regardless of which branch produced it.
///
/// # Errors
///
/// - [`OrderError::AddressNotFound`] — the referenced id resolves to nothing.
/// - [`OrderError::AddressAccessDenied`] — the saved address belongs to a
///   different customer.
/// - [`OrderError::InvalidAddress`] — neither input was supplied.
pub async fn resolve_delivery_address<A: AddressReader>(
    addresses: &A,
    customer_id: &CustomerId,
    details: &DeliveryDetails,
) -> Result<AddressSnapshot> {
    let mut snapshot = if let Some(address_id) = &details.delivery_address_id {
        let saved = addresses
            .find_by_id(address_id)
            .await?
            .ok_or_else(|| OrderError::AddressNotFound {
                address_id: address_id.clone(),
            })?;
        if &saved.user_id != customer_id {
            tracing::warn!(
                %customer_id,
                %address_id,
                "customer referenced an address they do not own"
            );
            return Err(OrderError::AddressAccessDenied {
                address_id: address_id.clone(),
            });
        }
        saved.to_snapshot()
    } else if let Some(inline) = &details.delivery_address {
        inline.clone()
    } else {
        return Err(OrderError::InvalidAddress);
    };

    if let Some(note) = &details.delivery_note {
        snapshot.note = Some(note.clone());
    }

    Ok(snapshot)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::mocks::MockAddressReader;
    use crate::providers::SavedAddress;

    fn saved_address(id: &str, owner: &str) -> SavedAddress {
        SavedAddress {
            id: AddressId::from(id),
            user_id: CustomerId::from(owner),
            label: Some("Home".to_string()),
            full_address: "12 Alley 5, District 1".to_string(),
            building: Some("B2".to_string()),
            room: Some("304".to_string()),
            note: Some("leave at the desk".to_string()),
        }
    }

    fn inline_snapshot() -> AddressSnapshot {
        AddressSnapshot {
            label: None,
            full_address: "99 Inline Road".to_string(),
            building: None,
            room: None,
            note: Some("ring twice".to_string()),
        }
    }

    #[tokio::test]
    async fn saved_reference_wins_over_inline() {
        let addresses = MockAddressReader::new();
        addresses.insert(saved_address("addr_abc123", "customer_1"));

        let details = DeliveryDetails {
            delivery_address_id: Some(AddressId::from("addr_abc123")),
            delivery_address: Some(inline_snapshot()),
            delivery_note: None,
        };

        let snapshot =
            resolve_delivery_address(&addresses, &CustomerId::from("customer_1"), &details)
                .await
                .unwrap();

        assert_eq!(snapshot.full_address, "12 Alley 5, District 1");
        assert_eq!(addresses.lookups(), 1);
    }

    #[tokio::test]
    async fn inline_snapshot_used_verbatim_with_zero_lookups() {
        let addresses = MockAddressReader::new();

        let details = DeliveryDetails {
            delivery_address_id: None,
            delivery_address: Some(inline_snapshot()),
            delivery_note: None,
        };

        let snapshot =
            resolve_delivery_address(&addresses, &CustomerId::from("customer_1"), &details)
                .await
                .unwrap();

        assert_eq!(snapshot, inline_snapshot());
        assert_eq!(addresses.lookups(), 0);
    }

    #[tokio::test]
    async fn request_note_overrides_saved_note() {
        let addresses = MockAddressReader::new();
        addresses.insert(saved_address("addr_abc123", "customer_1"));

        let details = DeliveryDetails {
            delivery_address_id: Some(AddressId::from("addr_abc123")),
            delivery_address: None,
            delivery_note: Some("call on arrival".to_string()),
        };

        let snapshot =
            resolve_delivery_address(&addresses, &CustomerId::from("customer_1"), &details)
                .await
                .unwrap();

        assert_eq!(snapshot.note.as_deref(), Some("call on arrival"));
    }

    #[tokio::test]
    async fn request_note_overrides_inline_note_too() {
        let addresses = MockAddressReader::new();

        let details = DeliveryDetails {
            delivery_address_id: None,
            delivery_address: Some(inline_snapshot()),
            delivery_note: Some("call on arrival".to_string()),
        };

        let snapshot =
            resolve_delivery_address(&addresses, &CustomerId::from("customer_1"), &details)
                .await
                .unwrap();

        assert_eq!(snapshot.note.as_deref(), Some("call on arrival"));
    }

    #[tokio::test]
    async fn missing_address_is_not_found() {
        let addresses = MockAddressReader::new();

        let details = DeliveryDetails {
            delivery_address_id: Some(AddressId::from("addr_missing")),
            delivery_address: None,
            delivery_note: None,
        };

        let err = resolve_delivery_address(&addresses, &CustomerId::from("customer_1"), &details)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ADDRESS_NOT_FOUND");
    }

    #[tokio::test]
    async fn foreign_address_is_access_denied_never_silent() {
        let addresses = MockAddressReader::new();
        addresses.insert(saved_address("addr_abc123", "customer_2"));

        let details = DeliveryDetails {
            delivery_address_id: Some(AddressId::from("addr_abc123")),
            delivery_address: Some(inline_snapshot()),
            delivery_note: None,
        };

        let err = resolve_delivery_address(&addresses, &CustomerId::from("customer_1"), &details)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ADDRESS_ACCESS_DENIED");
    }

    #[tokio::test]
    async fn no_address_at_all_is_invalid() {
        let addresses = MockAddressReader::new();

        let err = resolve_delivery_address(
            &addresses,
            &CustomerId::from("customer_1"),
            &DeliveryDetails::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "ORDER_INVALID_ADDRESS");
    }
}
