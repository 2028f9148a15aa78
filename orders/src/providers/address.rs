//! Saved delivery address read interface.

use crate::error::Result;
use crate::types::{AddressId, AddressSnapshot, CustomerId};
use serde::{Deserialize, Serialize};

/// A customer's saved delivery address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAddress {
    /// Address identifier.
    pub id: AddressId,
    /// The owning customer.
    pub user_id: CustomerId,
    /// Optional label (e.g. "Home", "Dorm B").
    pub label: Option<String>,
    /// Full street address.
    pub full_address: String,
    /// Optional building.
    pub building: Option<String>,
    /// Optional room.
    pub room: Option<String>,
    /// Optional delivery note stored with the address.
    pub note: Option<String>,
}

impl SavedAddress {
    /// Copies the address fields into an immutable order snapshot.
    #[must_use]
    pub fn to_snapshot(&self) -> AddressSnapshot {
        AddressSnapshot {
            label: self.label.clone(),
            full_address: self.full_address.clone(),
            building: self.building.clone(),
            room: self.room.clone(),
            note: self.note.clone(),
        }
    }
}

/// Saved address reader.
pub trait AddressReader: Send + Sync {
    /// Look up a saved address by id; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the address store is unreachable.
    async fn find_by_id(&self, address_id: &AddressId) -> Result<Option<SavedAddress>>;
}
