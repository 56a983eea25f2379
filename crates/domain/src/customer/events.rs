//! Customer domain events.

use common::EntityId;
use serde::{Deserialize, Serialize};

use super::{Address, Customer};
use crate::event::DomainEvent;

/// A customer was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreatedEvent {
    pub id: EntityId,
    pub name: String,
    pub address: Option<Address>,
}

impl DomainEvent for CustomerCreatedEvent {
    const NAME: &'static str = "CustomerCreatedEvent";
}

impl From<&Customer> for CustomerCreatedEvent {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().clone(),
            name: customer.name().to_string(),
            address: customer.address().cloned(),
        }
    }
}

/// A customer's address was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddressChangedEvent {
    pub id: EntityId,
    pub name: String,
    pub address: Address,
}

impl DomainEvent for CustomerAddressChangedEvent {
    const NAME: &'static str = "CustomerAddressChangedEvent";
}

impl CustomerAddressChangedEvent {
    /// Builds the event from a customer's current state.
    ///
    /// Returns `None` when the customer has no address.
    pub fn from_customer(customer: &Customer) -> Option<Self> {
        let address = customer.address()?.clone();
        Some(Self {
            id: customer.id().clone(),
            name: customer.name().to_string(),
            address,
        })
    }
}
