//! Plain row types, one per table.
//!
//! Rows mirror the relational schema column for column. Monetary columns are
//! stored in cents.

use common::EntityId;

/// A row of the `customers` table.
///
/// Address columns are nullable; they are either all set or all null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: EntityId,
    pub name: String,
    pub street: Option<String>,
    pub number: Option<i32>,
    pub zipcode: Option<String>,
    pub city: Option<String>,
    pub active: bool,
    pub reward_points: i64,
}

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: EntityId,
    pub name: String,
    pub price: i64,
}

/// A row of the `orders` table.
///
/// `total` duplicates the sum of the order's item subtotals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: EntityId,
    pub customer_id: EntityId,
    pub total: i64,
}

/// A row of the `order_items` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRow {
    pub id: EntityId,
    pub order_id: EntityId,
    pub product_id: EntityId,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
    /// Zero-based index of the item inside its order.
    pub position: i32,
}
