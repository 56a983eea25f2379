use async_trait::async_trait;
use common::EntityId;

use crate::{CustomerRow, OrderItemRow, OrderRow, ProductRow, Result};

/// CRUD operations over every table, executed within one transaction.
///
/// `find_*` operations signal a missing row with `None`; they never fail
/// because a row is absent. `update_*` and `destroy_*` return the number of
/// rows affected.
#[async_trait]
pub trait RowAccess: Send {
    async fn insert_customer(&mut self, row: &CustomerRow) -> Result<()>;

    async fn update_customer(&mut self, row: &CustomerRow) -> Result<u64>;

    async fn find_customer(&mut self, id: &EntityId) -> Result<Option<CustomerRow>>;

    /// Returns all customers ordered by id.
    async fn find_all_customers(&mut self) -> Result<Vec<CustomerRow>>;

    async fn insert_product(&mut self, row: &ProductRow) -> Result<()>;

    async fn update_product(&mut self, row: &ProductRow) -> Result<u64>;

    async fn find_product(&mut self, id: &EntityId) -> Result<Option<ProductRow>>;

    /// Returns all products ordered by id.
    async fn find_all_products(&mut self) -> Result<Vec<ProductRow>>;

    async fn insert_order(&mut self, row: &OrderRow) -> Result<()>;

    async fn update_order(&mut self, row: &OrderRow) -> Result<u64>;

    async fn find_order(&mut self, id: &EntityId) -> Result<Option<OrderRow>>;

    /// Returns all orders ordered by id.
    async fn find_all_orders(&mut self) -> Result<Vec<OrderRow>>;

    async fn insert_order_item(&mut self, row: &OrderItemRow) -> Result<()>;

    /// Returns the items of one order ordered by position.
    async fn find_order_items(&mut self, order_id: &EntityId) -> Result<Vec<OrderItemRow>>;

    /// Returns the items of every order, ordered by order id then position.
    async fn find_all_order_items(&mut self) -> Result<Vec<OrderItemRow>>;

    /// Deletes every item belonging to an order.
    async fn destroy_order_items(&mut self, order_id: &EntityId) -> Result<u64>;
}

/// An open unit of work.
///
/// Writes become visible to other transactions only after [`commit`].
/// Dropping a transaction without committing rolls it back.
///
/// [`commit`]: Transaction::commit
#[async_trait]
pub trait Transaction: RowAccess + Sized {
    /// Publishes every write made through this transaction.
    async fn commit(self) -> Result<()>;

    /// Discards every write made through this transaction.
    async fn rollback(self) -> Result<()>;
}

/// A transactional row store.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Store: Send + Sync {
    /// The transaction type handed out by [`Store::begin`].
    type Tx: Transaction;

    /// Opens a new transaction.
    async fn begin(&self) -> Result<Self::Tx>;
}
