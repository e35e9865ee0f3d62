use serde::{Deserialize, Serialize};

use crate::domain::ids::{AddressId, CustomerId};
use crate::error::ValidationError;

use super::value_objects::{Address, AddressFields};

// ============================================================================
// Address Book - Shipping addresses for one customer
// ============================================================================
//
// Invariants:
// - A non-empty book has exactly one default address
// - `selected` (the address chosen for this checkout) always refers to an
//   address in the book, or is None
//
// Every mutation takes `&mut self`, so no reader can observe the book
// between unsetting the old default and setting the new one.
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressBook {
    owner: CustomerId,
    addresses: Vec<Address>,
    selected: Option<AddressId>,
}

impl AddressBook {
    pub fn new(owner: CustomerId) -> Self {
        Self {
            owner,
            addresses: Vec::new(),
            selected: None,
        }
    }

    /// Build from addresses loaded from the backend. Repairs the default flag
    /// if the stored data has zero or several defaults, and pre-selects the
    /// default for checkout.
    pub fn from_addresses(owner: CustomerId, addresses: Vec<Address>) -> Self {
        let mut book = Self {
            owner,
            addresses,
            selected: None,
        };

        let default_id = book
            .addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| book.addresses.first())
            .map(|a| a.id);

        if let Some(id) = default_id {
            book.mark_default(id);
            book.selected = Some(id);
        }

        book
    }

    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    pub fn add_address(&mut self, fields: AddressFields) -> Result<AddressId, ValidationError> {
        let fields = fields.validated()?;
        let id = AddressId::new();
        let is_default = self.addresses.is_empty();

        self.addresses.push(fields.into_address(id, is_default));
        self.selected = Some(id);

        tracing::debug!(owner = %self.owner, address_id = %id, is_default, "Added address");
        Ok(id)
    }

    pub fn update_address(&mut self, id: AddressId, fields: AddressFields) -> Result<(), ValidationError> {
        let fields = fields.validated()?;
        let existing = self
            .addresses
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ValidationError::UnknownAddress(id))?;

        *existing = fields.into_address(id, existing.is_default);
        Ok(())
    }

    /// Removing the default promotes the first remaining address
    pub fn remove_address(&mut self, id: AddressId) -> Result<Address, ValidationError> {
        let index = self
            .addresses
            .iter()
            .position(|a| a.id == id)
            .ok_or(ValidationError::UnknownAddress(id))?;

        let removed = self.addresses.remove(index);

        if removed.is_default {
            if let Some(next) = self.addresses.first().map(|a| a.id) {
                self.mark_default(next);
            }
        }

        if self.selected == Some(id) {
            self.selected = self.default_address().map(|a| a.id);
        }

        Ok(removed)
    }

    pub fn set_default(&mut self, id: AddressId) -> Result<(), ValidationError> {
        if self.get(id).is_none() {
            return Err(ValidationError::UnknownAddress(id));
        }
        self.mark_default(id);
        tracing::debug!(owner = %self.owner, address_id = %id, "Default address changed");
        Ok(())
    }

    /// Choose the shipping address for the current checkout. Does not touch
    /// the persistent default flag.
    pub fn select(&mut self, id: AddressId) -> Result<(), ValidationError> {
        if self.get(id).is_none() {
            return Err(ValidationError::UnknownAddress(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn selected(&self) -> Option<&Address> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    pub fn get(&self, id: AddressId) -> Option<&Address> {
        self.addresses.iter().find(|a| a.id == id)
    }

    /// Default first, then insertion order
    pub fn addresses(&self) -> Vec<&Address> {
        let mut list: Vec<&Address> = self.addresses.iter().collect();
        list.sort_by_key(|a| !a.is_default);
        list
    }

    pub fn into_addresses(self) -> Vec<Address> {
        self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    fn mark_default(&mut self, id: AddressId) {
        for address in &mut self.addresses {
            address.is_default = address.id == id;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
