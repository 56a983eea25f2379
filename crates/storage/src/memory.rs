use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::EntityId;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    CustomerRow, OrderItemRow, OrderRow, ProductRow, Result, StorageError,
    store::{RowAccess, Store, Transaction},
};

#[derive(Debug, Clone, Default)]
struct Tables {
    customers: BTreeMap<EntityId, CustomerRow>,
    products: BTreeMap<EntityId, ProductRow>,
    orders: BTreeMap<EntityId, OrderRow>,
    order_items: BTreeMap<EntityId, OrderItemRow>,
}

/// In-memory row store implementation for testing.
///
/// Enforces the same primary and foreign keys as the PostgreSQL schema.
/// Transactions are serialized: an open transaction holds the store lock
/// until it is committed, rolled back or dropped, so a caller must not open
/// a second transaction on the same store while one is still open.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of committed customer rows.
    pub async fn customer_count(&self) -> usize {
        self.tables.lock().await.customers.len()
    }

    /// Returns the number of committed product rows.
    pub async fn product_count(&self) -> usize {
        self.tables.lock().await.products.len()
    }

    /// Returns the number of committed order rows.
    pub async fn order_count(&self) -> usize {
        self.tables.lock().await.orders.len()
    }

    /// Returns the number of committed order item rows.
    pub async fn order_item_count(&self) -> usize {
        self.tables.lock().await.order_items.len()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    type Tx = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTransaction { guard, staged })
    }
}

/// Transaction over an [`InMemoryStore`].
///
/// Writes are staged on a private copy of the tables and swapped in on
/// commit.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> Result<()> {
        let Self { mut guard, staged } = self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        tracing::debug!("in-memory transaction rolled back");
        Ok(())
    }
}

fn insert_unique<R: Clone>(
    table: &mut BTreeMap<EntityId, R>,
    name: &'static str,
    id: &EntityId,
    row: &R,
) -> Result<()> {
    if table.contains_key(id) {
        return Err(StorageError::UniqueViolation {
            table: name,
            key: id.to_string(),
        });
    }
    table.insert(id.clone(), row.clone());
    Ok(())
}

fn replace_existing<R: Clone>(table: &mut BTreeMap<EntityId, R>, id: &EntityId, row: &R) -> u64 {
    match table.get_mut(id) {
        Some(existing) => {
            *existing = row.clone();
            1
        }
        None => 0,
    }
}

fn require_parent<R>(
    parent: &BTreeMap<EntityId, R>,
    table: &'static str,
    key: &EntityId,
) -> Result<()> {
    if parent.contains_key(key) {
        Ok(())
    } else {
        Err(StorageError::ForeignKeyViolation {
            table,
            key: key.to_string(),
        })
    }
}

#[async_trait]
impl RowAccess for InMemoryTransaction {
    async fn insert_customer(&mut self, row: &CustomerRow) -> Result<()> {
        insert_unique(&mut self.staged.customers, "customers", &row.id, row)
    }

    async fn update_customer(&mut self, row: &CustomerRow) -> Result<u64> {
        Ok(replace_existing(&mut self.staged.customers, &row.id, row))
    }

    async fn find_customer(&mut self, id: &EntityId) -> Result<Option<CustomerRow>> {
        Ok(self.staged.customers.get(id).cloned())
    }

    async fn find_all_customers(&mut self) -> Result<Vec<CustomerRow>> {
        Ok(self.staged.customers.values().cloned().collect())
    }

    async fn insert_product(&mut self, row: &ProductRow) -> Result<()> {
        insert_unique(&mut self.staged.products, "products", &row.id, row)
    }

    async fn update_product(&mut self, row: &ProductRow) -> Result<u64> {
        Ok(replace_existing(&mut self.staged.products, &row.id, row))
    }

    async fn find_product(&mut self, id: &EntityId) -> Result<Option<ProductRow>> {
        Ok(self.staged.products.get(id).cloned())
    }

    async fn find_all_products(&mut self) -> Result<Vec<ProductRow>> {
        Ok(self.staged.products.values().cloned().collect())
    }

    async fn insert_order(&mut self, row: &OrderRow) -> Result<()> {
        require_parent(&self.staged.customers, "orders", &row.customer_id)?;
        insert_unique(&mut self.staged.orders, "orders", &row.id, row)
    }

    async fn update_order(&mut self, row: &OrderRow) -> Result<u64> {
        if self.staged.orders.contains_key(&row.id) {
            require_parent(&self.staged.customers, "orders", &row.customer_id)?;
        }
        Ok(replace_existing(&mut self.staged.orders, &row.id, row))
    }

    async fn find_order(&mut self, id: &EntityId) -> Result<Option<OrderRow>> {
        Ok(self.staged.orders.get(id).cloned())
    }

    async fn find_all_orders(&mut self) -> Result<Vec<OrderRow>> {
        Ok(self.staged.orders.values().cloned().collect())
    }

    async fn insert_order_item(&mut self, row: &OrderItemRow) -> Result<()> {
        require_parent(&self.staged.orders, "order_items", &row.order_id)?;
        require_parent(&self.staged.products, "order_items", &row.product_id)?;
        insert_unique(&mut self.staged.order_items, "order_items", &row.id, row)
    }

    async fn find_order_items(&mut self, order_id: &EntityId) -> Result<Vec<OrderItemRow>> {
        let mut items: Vec<_> = self
            .staged
            .order_items
            .values()
            .filter(|item| &item.order_id == order_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.position);
        Ok(items)
    }

    async fn find_all_order_items(&mut self) -> Result<Vec<OrderItemRow>> {
        let mut items: Vec<_> = self.staged.order_items.values().cloned().collect();
        items.sort_by(|a, b| {
            a.order_id
                .cmp(&b.order_id)
                .then(a.position.cmp(&b.position))
        });
        Ok(items)
    }

    async fn destroy_order_items(&mut self, order_id: &EntityId) -> Result<u64> {
        let before = self.staged.order_items.len();
        self.staged
            .order_items
            .retain(|_, item| &item.order_id != order_id);
        Ok((before - self.staged.order_items.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_row(id: &str) -> CustomerRow {
        CustomerRow {
            id: EntityId::from(id),
            name: format!("Customer {id}"),
            street: Some("Street 1".to_string()),
            number: Some(1),
            zipcode: Some("12345-678".to_string()),
            city: Some("City 1".to_string()),
            active: false,
            reward_points: 0,
        }
    }

    fn product_row(id: &str, price: i64) -> ProductRow {
        ProductRow {
            id: EntityId::from(id),
            name: format!("Product {id}"),
            price,
        }
    }

    fn item_row(id: &str, order_id: &str, position: i32) -> OrderItemRow {
        OrderItemRow {
            id: EntityId::from(id),
            order_id: EntityId::from(order_id),
            product_id: EntityId::from("p1"),
            name: "Product p1".to_string(),
            price: 1000,
            quantity: 1,
            position,
        }
    }

    async fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_customer(&customer_row("c1")).await.unwrap();
        tx.insert_product(&product_row("p1", 1000)).await.unwrap();
        tx.insert_order(&OrderRow {
            id: EntityId::from("o1"),
            customer_id: EntityId::from("c1"),
            total: 1000,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();
        store
    }

    #[tokio::test]
    async fn insert_and_find_customer() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_customer(&customer_row("c1")).await.unwrap();

        let found = tx.find_customer(&EntityId::from("c1")).await.unwrap();
        assert_eq!(found, Some(customer_row("c1")));
        tx.commit().await.unwrap();

        assert_eq!(store.customer_count().await, 1);
    }

    #[tokio::test]
    async fn find_missing_row_returns_none() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let found = tx.find_product(&EntityId::from("missing")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn duplicate_primary_key_is_rejected() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_product(&product_row("p1", 1000)).await.unwrap();

        let result = tx.insert_product(&product_row("p1", 2000)).await;
        assert!(matches!(
            result,
            Err(StorageError::UniqueViolation {
                table: "products",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn update_reports_rows_affected() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_product(&product_row("p1", 1000)).await.unwrap();

        assert_eq!(tx.update_product(&product_row("p1", 1500)).await.unwrap(), 1);
        assert_eq!(tx.update_product(&product_row("p2", 1500)).await.unwrap(), 0);

        let found = tx.find_product(&EntityId::from("p1")).await.unwrap();
        assert_eq!(found.unwrap().price, 1500);
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let store = InMemoryStore::new();
        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_customer(&customer_row("c1")).await.unwrap();
        }
        assert_eq!(store.customer_count().await, 0);
    }

    #[tokio::test]
    async fn explicit_rollback_discards_writes() {
        let store = seeded_store().await;
        let mut tx = store.begin().await.unwrap();
        tx.insert_order_item(&item_row("i1", "o1", 0)).await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(store.order_item_count().await, 0);
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn order_requires_existing_customer() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let result = tx
            .insert_order(&OrderRow {
                id: EntityId::from("o1"),
                customer_id: EntityId::from("nobody"),
                total: 0,
            })
            .await;
        assert!(matches!(
            result,
            Err(StorageError::ForeignKeyViolation { table: "orders", .. })
        ));
    }

    #[tokio::test]
    async fn order_items_are_returned_by_position() {
        let store = seeded_store().await;
        let mut tx = store.begin().await.unwrap();
        tx.insert_order_item(&item_row("z-item", "o1", 0)).await.unwrap();
        tx.insert_order_item(&item_row("a-item", "o1", 1)).await.unwrap();

        let items = tx.find_order_items(&EntityId::from("o1")).await.unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["z-item", "a-item"]);
    }

    #[tokio::test]
    async fn destroy_order_items_removes_only_that_order() {
        let store = seeded_store().await;
        let mut tx = store.begin().await.unwrap();
        tx.insert_order(&OrderRow {
            id: EntityId::from("o2"),
            customer_id: EntityId::from("c1"),
            total: 1000,
        })
        .await
        .unwrap();
        tx.insert_order_item(&item_row("i1", "o1", 0)).await.unwrap();
        tx.insert_order_item(&item_row("i2", "o1", 1)).await.unwrap();
        tx.insert_order_item(&item_row("i3", "o2", 0)).await.unwrap();

        let removed = tx.destroy_order_items(&EntityId::from("o1")).await.unwrap();
        assert_eq!(removed, 2);

        let remaining = tx.find_all_order_items().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id.as_str(), "i3");
    }
}
