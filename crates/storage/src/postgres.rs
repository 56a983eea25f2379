use async_trait::async_trait;
use common::EntityId;
use sqlx::{PgPool, Postgres, Row, postgres::PgRow};

use crate::{
    CustomerRow, OrderItemRow, OrderRow, ProductRow, Result, StorageError,
    store::{RowAccess, Store, Transaction},
};

/// PostgreSQL-backed row store implementation.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    type Tx = PgTransaction;

    async fn begin(&self) -> Result<PgTransaction> {
        let tx = self.pool.begin().await?;
        Ok(PgTransaction { tx })
    }
}

/// Transaction over a [`PgStore`].
///
/// sqlx rolls the transaction back when it is dropped uncommitted.
pub struct PgTransaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl Transaction for PgTransaction {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

/// Maps constraint violations onto the backend-neutral error variants.
fn map_write_error(table: &'static str, key: &EntityId, e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return StorageError::UniqueViolation {
                table,
                key: key.to_string(),
            };
        }
        if db_err.is_foreign_key_violation() {
            return StorageError::ForeignKeyViolation {
                table,
                key: key.to_string(),
            };
        }
    }
    StorageError::Database(e)
}

fn row_to_customer(row: PgRow) -> Result<CustomerRow> {
    Ok(CustomerRow {
        id: EntityId::from(row.try_get::<String, _>("id")?),
        name: row.try_get("name")?,
        street: row.try_get("street")?,
        number: row.try_get("number")?,
        zipcode: row.try_get("zipcode")?,
        city: row.try_get("city")?,
        active: row.try_get("active")?,
        reward_points: row.try_get("reward_points")?,
    })
}

fn row_to_product(row: PgRow) -> Result<ProductRow> {
    Ok(ProductRow {
        id: EntityId::from(row.try_get::<String, _>("id")?),
        name: row.try_get("name")?,
        price: row.try_get("price")?,
    })
}

fn row_to_order(row: PgRow) -> Result<OrderRow> {
    Ok(OrderRow {
        id: EntityId::from(row.try_get::<String, _>("id")?),
        customer_id: EntityId::from(row.try_get::<String, _>("customer_id")?),
        total: row.try_get("total")?,
    })
}

fn row_to_order_item(row: PgRow) -> Result<OrderItemRow> {
    Ok(OrderItemRow {
        id: EntityId::from(row.try_get::<String, _>("id")?),
        order_id: EntityId::from(row.try_get::<String, _>("order_id")?),
        product_id: EntityId::from(row.try_get::<String, _>("product_id")?),
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
        position: row.try_get("position")?,
    })
}

#[async_trait]
impl RowAccess for PgTransaction {
    async fn insert_customer(&mut self, row: &CustomerRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(row.id.as_str())
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zipcode)
        .bind(&row.city)
        .bind(row.active)
        .bind(row.reward_points)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_write_error("customers", &row.id, e))?;

        Ok(())
    }

    async fn update_customer(&mut self, row: &CustomerRow) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zipcode = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(row.id.as_str())
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zipcode)
        .bind(&row.city)
        .bind(row.active)
        .bind(row.reward_points)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn find_customer(&mut self, id: &EntityId) -> Result<Option<CustomerRow>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(row_to_customer).transpose()
    }

    async fn find_all_customers(&mut self) -> Result<Vec<CustomerRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        rows.into_iter().map(row_to_customer).collect()
    }

    async fn insert_product(&mut self, row: &ProductRow) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(row.id.as_str())
            .bind(&row.name)
            .bind(row.price)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_write_error("products", &row.id, e))?;

        Ok(())
    }

    async fn update_product(&mut self, row: &ProductRow) -> Result<u64> {
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(row.id.as_str())
            .bind(&row.name)
            .bind(row.price)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_product(&mut self, id: &EntityId) -> Result<Option<ProductRow>> {
        let row: Option<PgRow> = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&mut *self.tx)
            .await?;

        row.map(row_to_product).transpose()
    }

    async fn find_all_products(&mut self) -> Result<Vec<ProductRow>> {
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY id ASC")
            .fetch_all(&mut *self.tx)
            .await?;

        rows.into_iter().map(row_to_product).collect()
    }

    async fn insert_order(&mut self, row: &OrderRow) -> Result<()> {
        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES ($1, $2, $3)")
            .bind(row.id.as_str())
            .bind(row.customer_id.as_str())
            .bind(row.total)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_write_error("orders", &row.id, e))?;

        Ok(())
    }

    async fn update_order(&mut self, row: &OrderRow) -> Result<u64> {
        let result = sqlx::query("UPDATE orders SET customer_id = $2, total = $3 WHERE id = $1")
            .bind(row.id.as_str())
            .bind(row.customer_id.as_str())
            .bind(row.total)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_write_error("orders", &row.id, e))?;

        Ok(result.rows_affected())
    }

    async fn find_order(&mut self, id: &EntityId) -> Result<Option<OrderRow>> {
        let row: Option<PgRow> =
            sqlx::query("SELECT id, customer_id, total FROM orders WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&mut *self.tx)
                .await?;

        row.map(row_to_order).transpose()
    }

    async fn find_all_orders(&mut self) -> Result<Vec<OrderRow>> {
        let rows = sqlx::query("SELECT id, customer_id, total FROM orders ORDER BY id ASC")
            .fetch_all(&mut *self.tx)
            .await?;

        rows.into_iter().map(row_to_order).collect()
    }

    async fn insert_order_item(&mut self, row: &OrderItemRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, product_id, name, price, quantity, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(row.id.as_str())
        .bind(row.order_id.as_str())
        .bind(row.product_id.as_str())
        .bind(&row.name)
        .bind(row.price)
        .bind(row.quantity)
        .bind(row.position)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_write_error("order_items", &row.id, e))?;

        Ok(())
    }

    async fn find_order_items(&mut self, order_id: &EntityId) -> Result<Vec<OrderItemRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, name, price, quantity, position
            FROM order_items
            WHERE order_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(order_id.as_str())
        .fetch_all(&mut *self.tx)
        .await?;

        rows.into_iter().map(row_to_order_item).collect()
    }

    async fn find_all_order_items(&mut self) -> Result<Vec<OrderItemRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, name, price, quantity, position
            FROM order_items
            ORDER BY order_id ASC, position ASC
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        rows.into_iter().map(row_to_order_item).collect()
    }

    async fn destroy_order_items(&mut self, order_id: &EntityId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id.as_str())
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }
}
