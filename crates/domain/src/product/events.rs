use serde::{Deserialize, Serialize};

use super::Product;
use crate::Money;
use crate::event::DomainEvent;

/// A product was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreatedEvent {
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub description: String,
}

impl DomainEvent for ProductCreatedEvent {
    const NAME: &'static str = "ProductCreatedEvent";
}

impl ProductCreatedEvent {
    pub fn new(product: &Product, description: impl Into<String>) -> Self {
        Self {
            name: product.name().to_string(),
            price: product.price(),
            description: description.into(),
        }
    }
}
