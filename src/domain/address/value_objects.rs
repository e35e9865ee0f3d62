use serde::{Deserialize, Serialize};

use crate::domain::ids::AddressId;
use crate::error::ValidationError;

// ============================================================================
// Address Value Objects
// ============================================================================

/// A stored shipping address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub is_default: bool,
}

impl Address {
    /// Single-line rendering used on the order review screen
    pub fn one_line(&self) -> String {
        format!("{}, {}, {} - {}", self.street, self.city, self.state, self.postal_code)
    }
}

/// User-entered address fields, before an id is assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressFields {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl AddressFields {
    /// Every field is required; surrounding whitespace is stripped
    pub fn validated(self) -> Result<Self, ValidationError> {
        let fields = Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
        };

        let required = [
            ("name", &fields.name),
            ("phone", &fields.phone),
            ("street", &fields.street),
            ("city", &fields.city),
            ("state", &fields.state),
            ("postal_code", &fields.postal_code),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(ValidationError::BlankField(*field));
        }

        Ok(fields)
    }

    pub(crate) fn into_address(self, id: AddressId, is_default: bool) -> Address {
        Address {
            id,
            name: self.name,
            phone: self.phone,
            street: self.street,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            is_default,
        }
    }
}
