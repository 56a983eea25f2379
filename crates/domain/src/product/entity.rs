use common::EntityId;

use crate::Money;
use crate::error::{DomainError, require, require_id};

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: EntityId,
    name: String,
    price: Money,
}

impl Product {
    /// Creates a product. The price must not be negative.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        price: Money,
    ) -> Result<Self, DomainError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        require_id("Product", "id", &product.id)?;
        require("Product", "name", &product.name)?;
        check_price(price)?;
        Ok(product)
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        require("Product", "name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: Money) -> Result<(), DomainError> {
        check_price(price)?;
        self.price = price;
        Ok(())
    }
}

fn check_price(price: Money) -> Result<(), DomainError> {
    if price.is_negative() {
        return Err(DomainError::NegativePrice { price });
    }
    Ok(())
}
