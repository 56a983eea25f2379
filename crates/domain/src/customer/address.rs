use serde::{Deserialize, Serialize};

use crate::error::{DomainError, require};

/// A postal address.
///
/// Value object: immutable once constructed and compared field by field.
/// Every field is mandatory, so an `Address` is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AddressFields")]
pub struct Address {
    street: String,
    number: i32,
    zip: String,
    city: String,
}

/// Unvalidated wire shape of an address.
#[derive(Deserialize)]
struct AddressFields {
    street: String,
    number: i32,
    zip: String,
    city: String,
}

impl TryFrom<AddressFields> for Address {
    type Error = DomainError;

    fn try_from(fields: AddressFields) -> Result<Self, Self::Error> {
        Address::new(fields.street, fields.number, fields.zip, fields.city)
    }
}

impl Address {
    /// Creates a validated address.
    pub fn new(
        street: impl Into<String>,
        number: i32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        require("Address", "street", &address.street)?;
        if address.number <= 0 {
            return Err(DomainError::InvalidAddressNumber { number });
        }
        require("Address", "zip", &address.zip)?;
        require("Address", "city", &address.city)?;
        Ok(address)
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}
