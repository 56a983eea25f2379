//! Domain error types.

use common::EntityId;
use thiserror::Error;

use crate::Money;

/// Errors raised when an entity or value object invariant is violated.
///
/// These are raised at the construction or mutation site, never deferred
/// to persistence time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A mandatory field is empty.
    #[error("{entity}: {field} is required")]
    Required {
        entity: &'static str,
        field: &'static str,
    },

    /// Reward points can only be added, never subtracted.
    #[error("Invalid reward points: {points} (must not be negative)")]
    NegativeRewardPoints { points: i64 },

    /// Prices must not be negative.
    #[error("Invalid price: {price} (must not be negative)")]
    NegativePrice { price: Money },

    /// Item quantities must be positive.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: i64 },

    /// An amount does not fit the numeric range of its column.
    #[error("Amount overflow: {what} exceeds the representable range")]
    AmountOverflow { what: &'static str },

    /// Address numbers must be positive.
    #[error("Invalid address number: {number} (must be greater than 0)")]
    InvalidAddressNumber { number: i32 },

    /// An order needs at least one item.
    #[error("Order has no items")]
    NoItems,

    /// Item not found in order.
    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: String },

    /// The entity is not in a state that allows the operation.
    #[error("Invalid state: cannot {action}: {reason}")]
    InvalidState {
        action: &'static str,
        reason: &'static str,
    },
}

impl DomainError {
    /// Returns true for invariant violations on input values, as opposed to
    /// operations rejected because of the entity's current state.
    pub fn is_validation(&self) -> bool {
        !matches!(self, DomainError::InvalidState { .. })
    }
}

/// Fails with [`DomainError::Required`] when `value` is blank.
pub(crate) fn require(entity: &'static str, field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Required { entity, field });
    }
    Ok(())
}

/// Fails with [`DomainError::Required`] when `id` is blank.
pub(crate) fn require_id(
    entity: &'static str,
    field: &'static str,
    id: &EntityId,
) -> Result<(), DomainError> {
    if id.is_blank() {
        return Err(DomainError::Required { entity, field });
    }
    Ok(())
}
