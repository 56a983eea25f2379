//! Order aggregate implementation.

use common::EntityId;

use super::OrderItem;
use crate::Money;
use crate::error::{DomainError, require_id};

/// Order aggregate root.
///
/// Owns its items exclusively; an order always has at least one item. The
/// total is never stored, it is recomputed from the items on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: EntityId,
    customer_id: EntityId,
    items: Vec<OrderItem>,
}

// Query methods
impl Order {
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn customer_id(&self) -> &EntityId {
        &self.customer_id
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns an item by id.
    pub fn get_item(&self, item_id: &EntityId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(OrderItem::quantity).sum()
    }

    /// Returns the sum of the item subtotals.
    pub fn total(&self) -> Money {
        // Every mutation checks the total fits, so the sum never saturates.
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}

/// Sums the subtotals, failing when the total does not fit in [`Money`].
fn checked_total(items: &[OrderItem]) -> Result<Money, DomainError> {
    items
        .iter()
        .try_fold(Money::zero(), |total, item| total.checked_add(item.subtotal()))
        .ok_or(DomainError::AmountOverflow {
            what: "order total",
        })
}

// Mutation methods
impl Order {
    /// Creates an order.
    ///
    /// Fails with [`DomainError::NoItems`] for an empty item list and with
    /// [`DomainError::AmountOverflow`] when the total does not fit.
    pub fn new(
        id: impl Into<EntityId>,
        customer_id: impl Into<EntityId>,
        items: Vec<OrderItem>,
    ) -> Result<Self, DomainError> {
        let order = Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
        };
        require_id("Order", "id", &order.id)?;
        require_id("Order", "customer_id", &order.customer_id)?;
        if order.items.is_empty() {
            return Err(DomainError::NoItems);
        }
        checked_total(&order.items)?;
        Ok(order)
    }

    /// Appends an item. The order is left unchanged if the total would overflow.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), DomainError> {
        let total = checked_total(&self.items)?;
        if total.checked_add(item.subtotal()).is_none() {
            return Err(DomainError::AmountOverflow {
                what: "order total",
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes an item by id. The last item cannot be removed.
    pub fn remove_item(&mut self, item_id: &EntityId) -> Result<OrderItem, DomainError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == item_id)
            .ok_or_else(|| DomainError::ItemNotFound {
                item_id: item_id.to_string(),
            })?;
        if self.items.len() == 1 {
            return Err(DomainError::NoItems);
        }
        Ok(self.items.remove(index))
    }

    /// Replaces the whole item set.
    pub fn change_items(&mut self, items: Vec<OrderItem>) -> Result<(), DomainError> {
        if items.is_empty() {
            return Err(DomainError::NoItems);
        }
        checked_total(&items)?;
        self.items = items;
        Ok(())
    }
}
