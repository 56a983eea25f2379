//! Order persistence.
//!
//! An order is stored as one row in `orders` plus one row per item in
//! `order_items`. Both tables are always written inside a single
//! transaction, so a failed item write never leaves a half-written order.

use std::collections::HashMap;

use async_trait::async_trait;
use common::EntityId;
use storage::{OrderItemRow, OrderRow, RowAccess, Store, Transaction};

use super::{Order, OrderItem};
use crate::Money;
use crate::repository::{Repository, RepositoryError, Result};

const ENTITY: &str = "Order";

/// Maps orders to rows of the `orders` and `order_items` tables.
pub struct OrderRepository<S: Store> {
    store: S,
}

impl<S: Store> OrderRepository<S> {
    /// Creates a new repository backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Inserts the order row, then one row per item.
    pub async fn create_in(&self, tx: &mut S::Tx, order: &Order) -> Result<()> {
        tx.insert_order(&to_order_row(order)).await?;
        insert_items(tx, order).await?;
        metrics::counter!("repository_writes", "entity" => ENTITY).increment(1);
        Ok(())
    }

    /// Updates the order row and replaces the item rows wholesale.
    ///
    /// Existing item rows are deleted and the current items inserted again,
    /// so the stored items always match the aggregate exactly.
    pub async fn update_in(&self, tx: &mut S::Tx, order: &Order) -> Result<()> {
        if tx.update_order(&to_order_row(order)).await? == 0 {
            return Err(RepositoryError::not_found(ENTITY, order.id()));
        }
        let removed = tx.destroy_order_items(order.id()).await?;
        insert_items(tx, order).await?;
        tracing::debug!(
            removed,
            inserted = order.items().len(),
            "order items replaced"
        );
        metrics::counter!("repository_writes", "entity" => ENTITY).increment(1);
        Ok(())
    }

    pub async fn find_in(&self, tx: &mut S::Tx, id: &EntityId) -> Result<Order> {
        let row = tx
            .find_order(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;
        let items = tx.find_order_items(id).await?;
        from_rows(row, items)
    }

    /// Loads every order with two queries: all orders, then all items.
    pub async fn find_all_in(&self, tx: &mut S::Tx) -> Result<Vec<Order>> {
        let rows = tx.find_all_orders().await?;
        let mut items_by_order: HashMap<EntityId, Vec<OrderItemRow>> = HashMap::new();
        for item in tx.find_all_order_items().await? {
            items_by_order
                .entry(item.order_id.clone())
                .or_default()
                .push(item);
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                from_rows(row, items)
            })
            .collect()
    }
}

#[async_trait]
impl<S: Store> Repository<Order> for OrderRepository<S> {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id(), items = order.items().len()))]
    async fn create(&self, order: &Order) -> Result<()> {
        let mut tx = self.store.begin().await?;
        self.create_in(&mut tx, order).await?;
        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id(), items = order.items().len()))]
    async fn update(&self, order: &Order) -> Result<()> {
        let mut tx = self.store.begin().await?;
        self.update_in(&mut tx, order).await?;
        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &EntityId) -> Result<Order> {
        let mut tx = self.store.begin().await?;
        let order = self.find_in(&mut tx, id).await?;
        tx.commit().await?;
        Ok(order)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Order>> {
        let mut tx = self.store.begin().await?;
        let orders = self.find_all_in(&mut tx).await?;
        tx.commit().await?;
        Ok(orders)
    }
}

async fn insert_items<A: RowAccess + ?Sized>(tx: &mut A, order: &Order) -> Result<()> {
    for (index, item) in order.items().iter().enumerate() {
        tx.insert_order_item(&to_item_row(order.id(), index, item)?)
            .await?;
    }
    Ok(())
}

fn to_order_row(order: &Order) -> OrderRow {
    OrderRow {
        id: order.id().clone(),
        customer_id: order.customer_id().clone(),
        total: order.total().cents(),
    }
}

fn to_item_row(order_id: &EntityId, index: usize, item: &OrderItem) -> Result<OrderItemRow> {
    let overflow = |column: &str| RepositoryError::Mapping {
        entity: ENTITY,
        id: order_id.clone(),
        reason: format!("{column} of item {} does not fit the column", item.id()),
    };

    Ok(OrderItemRow {
        id: item.id().clone(),
        order_id: order_id.clone(),
        product_id: item.product_id().clone(),
        name: item.name().to_string(),
        price: item.price().cents(),
        quantity: i32::try_from(item.quantity()).map_err(|_| overflow("quantity"))?,
        position: i32::try_from(index).map_err(|_| overflow("position"))?,
    })
}

fn from_rows(row: OrderRow, items: Vec<OrderItemRow>) -> Result<Order> {
    let id = row.id.clone();
    let invalid = |e| RepositoryError::invalid_row(ENTITY, &id, e);

    let items = items
        .into_iter()
        .map(|item| {
            let quantity = u32::try_from(item.quantity).map_err(|_| {
                invalid(crate::DomainError::InvalidQuantity {
                    quantity: i64::from(item.quantity),
                })
            })?;
            OrderItem::new(
                item.id,
                item.name,
                Money::from_cents(item.price),
                item.product_id,
                quantity,
            )
            .map_err(invalid)
        })
        .collect::<Result<Vec<_>>>()?;

    let order = Order::new(row.id, row.customer_id, items).map_err(invalid)?;
    if order.total().cents() != row.total {
        tracing::warn!(
            order_id = %order.id(),
            stored = row.total,
            computed = order.total().cents(),
            "stored order total disagrees with items"
        );
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        let items = vec![
            OrderItem::new("i1", "Item 1", Money::from_units(10), "p1", 2).unwrap(),
            OrderItem::new("i2", "Item 2", Money::from_units(5), "p2", 3).unwrap(),
        ];
        Order::new("o1", "c1", items).unwrap()
    }

    #[test]
    fn order_row_carries_denormalized_total() {
        let row = to_order_row(&order());
        assert_eq!(row.total, Money::from_units(35).cents());
        assert_eq!(row.customer_id.as_str(), "c1");
    }

    #[test]
    fn item_rows_record_position() {
        let order = order();
        let rows: Vec<_> = order
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| to_item_row(order.id(), i, item).unwrap())
            .collect();
        assert_eq!(rows[0].position, 0);
        assert_eq!(rows[1].position, 1);
        assert_eq!(rows[1].order_id.as_str(), "o1");
        assert_eq!(rows[1].price, 500);
    }

    #[test]
    fn rows_map_back_to_order() {
        let order = order();
        let items = order
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| to_item_row(order.id(), i, item).unwrap())
            .collect();
        let restored = from_rows(to_order_row(&order), items).unwrap();
        assert_eq!(restored, order);
    }

    #[test]
    fn order_row_without_items_is_rejected() {
        let result = from_rows(to_order_row(&order()), vec![]);
        assert!(matches!(result, Err(RepositoryError::Mapping { .. })));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let order = order();
        let mut item = to_item_row(order.id(), 0, &order.items()[0]).unwrap();
        item.quantity = -1;
        let result = from_rows(to_order_row(&order), vec![item]);
        assert!(matches!(result, Err(RepositoryError::Mapping { .. })));
    }

    #[test]
    fn overflowing_item_rows_are_rejected() {
        let order = order();
        let mut first = to_item_row(order.id(), 0, &order.items()[0]).unwrap();
        first.price = i64::MAX;
        first.quantity = 1;
        let mut second = to_item_row(order.id(), 1, &order.items()[1]).unwrap();
        second.price = 1;
        second.quantity = 1;

        let result = from_rows(to_order_row(&order), vec![first, second]);

        assert!(matches!(result, Err(RepositoryError::Mapping { .. })));
    }
}
