//! Customer entity.

use common::EntityId;

use super::Address;
use crate::error::{DomainError, require, require_id};

/// A customer.
///
/// A customer starts inactive, with no address and no reward points.
/// Activation requires an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: EntityId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: i64,
}

// Query methods
impl Customer {
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the address, if one has been set.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> i64 {
        self.reward_points
    }
}

// Mutation methods
impl Customer {
    /// Creates a new inactive customer.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Result<Self, DomainError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0,
        };
        require_id("Customer", "id", &customer.id)?;
        require("Customer", "name", &customer.name)?;
        Ok(customer)
    }

    /// Renames the customer.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        require("Customer", "name", &name)?;
        self.name = name;
        Ok(())
    }

    /// Replaces the address. The previous address is discarded.
    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Activates the customer.
    ///
    /// Fails with [`DomainError::InvalidState`] when no address is set.
    pub fn activate(&mut self) -> Result<(), DomainError> {
        if self.address.is_none() {
            return Err(DomainError::InvalidState {
                action: "activate customer",
                reason: "address is mandatory",
            });
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Adds reward points. Negative amounts and overflowing balances are rejected.
    pub fn add_reward_points(&mut self, points: i64) -> Result<(), DomainError> {
        if points < 0 {
            return Err(DomainError::NegativeRewardPoints { points });
        }
        self.reward_points = self
            .reward_points
            .checked_add(points)
            .ok_or(DomainError::AmountOverflow {
                what: "reward points",
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address::new("Street 1", 123, "13330-250", "São Paulo").unwrap()
    }

    #[test]
    fn new_customer_defaults() {
        let customer = Customer::new("123", "John").unwrap();
        assert_eq!(customer.id().as_str(), "123");
        assert_eq!(customer.name(), "John");
        assert!(customer.address().is_none());
        assert!(!customer.is_active());
        assert_eq!(customer.reward_points(), 0);
    }

    #[test]
    fn empty_id_or_name_is_rejected() {
        assert_eq!(
            Customer::new("", "John"),
            Err(DomainError::Required {
                entity: "Customer",
                field: "id"
            })
        );
        assert_eq!(
            Customer::new("123", ""),
            Err(DomainError::Required {
                entity: "Customer",
                field: "name"
            })
        );
    }

    #[test]
    fn change_name() {
        let mut customer = Customer::new("123", "John").unwrap();
        customer.change_name("Jane").unwrap();
        assert_eq!(customer.name(), "Jane");
        assert!(customer.change_name("").is_err());
        assert_eq!(customer.name(), "Jane");
    }

    #[test]
    fn change_address_replaces_previous() {
        let mut customer = Customer::new("123", "John").unwrap();
        customer.change_address(address());
        let other = Address::new("Street 2", 2, "Zip 2", "City 2").unwrap();
        customer.change_address(other.clone());
        assert_eq!(customer.address(), Some(&other));
    }

    #[test]
    fn activate_without_address_fails() {
        let mut customer = Customer::new("123", "John").unwrap();
        let result = customer.activate();
        assert!(matches!(result, Err(DomainError::InvalidState { .. })));
        assert!(!result.unwrap_err().is_validation());
        assert!(!customer.is_active());
    }

    #[test]
    fn activate_and_deactivate() {
        let mut customer = Customer::new("123", "John").unwrap();
        customer.change_address(address());
        customer.activate().unwrap();
        assert!(customer.is_active());
        customer.deactivate();
        assert!(!customer.is_active());
    }

    #[test]
    fn reward_points_accumulate() {
        let mut customer = Customer::new("123", "John").unwrap();
        customer.add_reward_points(10).unwrap();
        customer.add_reward_points(0).unwrap();
        customer.add_reward_points(20).unwrap();
        assert_eq!(customer.reward_points(), 30);
    }

    #[test]
    fn negative_reward_points_fail() {
        let mut customer = Customer::new("123", "John").unwrap();
        let result = customer.add_reward_points(-1);
        assert_eq!(result, Err(DomainError::NegativeRewardPoints { points: -1 }));
        assert!(result.unwrap_err().is_validation());
        assert_eq!(customer.reward_points(), 0);
    }

    #[test]
    fn overflowing_reward_points_fail() {
        let mut customer = Customer::new("123", "John").unwrap();
        customer.add_reward_points(i64::MAX).unwrap();
        let result = customer.add_reward_points(1);
        assert_eq!(
            result,
            Err(DomainError::AmountOverflow {
                what: "reward points"
            })
        );
        assert_eq!(customer.reward_points(), i64::MAX);
    }
}
