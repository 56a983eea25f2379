//! Order line items.

use common::EntityId;

use crate::Money;
use crate::error::{DomainError, require, require_id};

/// Largest accepted quantity; matches the `INTEGER` quantity column.
pub const MAX_QUANTITY: u32 = i32::MAX as u32;

/// A line of an order.
///
/// The name and price are a snapshot taken when the item is created; later
/// changes to the product do not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    id: EntityId,
    name: String,
    price: Money,
    product_id: EntityId,
    quantity: u32,
}

impl OrderItem {
    /// Creates a new order item.
    ///
    /// Quantity must be between 1 and [`MAX_QUANTITY`], price non-negative,
    /// and price × quantity must fit in [`Money`].
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        price: Money,
        product_id: impl Into<EntityId>,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        };
        require_id("OrderItem", "id", &item.id)?;
        require("OrderItem", "name", &item.name)?;
        require_id("OrderItem", "product_id", &item.product_id)?;
        if price.is_negative() {
            return Err(DomainError::NegativePrice { price });
        }
        if quantity == 0 || quantity > MAX_QUANTITY {
            return Err(DomainError::InvalidQuantity {
                quantity: i64::from(quantity),
            });
        }
        if price.checked_mul(quantity).is_none() {
            return Err(DomainError::AmountOverflow {
                what: "order item subtotal",
            });
        }
        Ok(item)
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn product_id(&self) -> &EntityId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns price × quantity.
    pub fn subtotal(&self) -> Money {
        // Checked in `new`, so this never saturates.
        self.price.saturating_mul(self.quantity)
    }
}
