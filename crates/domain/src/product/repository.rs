//! Product persistence.

use async_trait::async_trait;
use common::EntityId;
use storage::{ProductRow, RowAccess, Store, Transaction};

use super::Product;
use crate::Money;
use crate::repository::{Repository, RepositoryError, Result};

const ENTITY: &str = "Product";

/// Maps products to rows of the `products` table.
pub struct ProductRepository<S: Store> {
    store: S,
}

impl<S: Store> ProductRepository<S> {
    /// Creates a new repository backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_in(&self, tx: &mut S::Tx, product: &Product) -> Result<()> {
        tx.insert_product(&to_row(product)).await?;
        metrics::counter!("repository_writes", "entity" => ENTITY).increment(1);
        Ok(())
    }

    pub async fn update_in(&self, tx: &mut S::Tx, product: &Product) -> Result<()> {
        if tx.update_product(&to_row(product)).await? == 0 {
            return Err(RepositoryError::not_found(ENTITY, product.id()));
        }
        metrics::counter!("repository_writes", "entity" => ENTITY).increment(1);
        Ok(())
    }

    pub async fn find_in(&self, tx: &mut S::Tx, id: &EntityId) -> Result<Product> {
        let row = tx
            .find_product(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;
        from_row(row)
    }

    pub async fn find_all_in(&self, tx: &mut S::Tx) -> Result<Vec<Product>> {
        tx.find_all_products()
            .await?
            .into_iter()
            .map(from_row)
            .collect()
    }
}

#[async_trait]
impl<S: Store> Repository<Product> for ProductRepository<S> {
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn create(&self, product: &Product) -> Result<()> {
        let mut tx = self.store.begin().await?;
        self.create_in(&mut tx, product).await?;
        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn update(&self, product: &Product) -> Result<()> {
        let mut tx = self.store.begin().await?;
        self.update_in(&mut tx, product).await?;
        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &EntityId) -> Result<Product> {
        let mut tx = self.store.begin().await?;
        let product = self.find_in(&mut tx, id).await?;
        tx.commit().await?;
        Ok(product)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>> {
        let mut tx = self.store.begin().await?;
        let products = self.find_all_in(&mut tx).await?;
        tx.commit().await?;
        Ok(products)
    }
}

fn to_row(product: &Product) -> ProductRow {
    ProductRow {
        id: product.id().clone(),
        name: product.name().to_string(),
        price: product.price().cents(),
    }
}

fn from_row(row: ProductRow) -> Result<Product> {
    let id = row.id.clone();
    Product::new(row.id, row.name, Money::from_cents(row.price))
        .map_err(|e| RepositoryError::invalid_row(ENTITY, &id, e))
}
