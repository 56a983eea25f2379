//! Customer persistence.

use async_trait::async_trait;
use common::EntityId;
use storage::{CustomerRow, RowAccess, Store, Transaction};

use super::{Address, Customer};
use crate::repository::{Repository, RepositoryError, Result};

const ENTITY: &str = "Customer";

/// Maps customers to rows of the `customers` table.
///
/// Every operation has a `*_in` variant that runs inside a transaction
/// supplied by the caller, so several writes can share one unit of work.
/// The [`Repository`] methods open and commit their own transaction.
pub struct CustomerRepository<S: Store> {
    store: S,
}

impl<S: Store> CustomerRepository<S> {
    /// Creates a new repository backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_in(&self, tx: &mut S::Tx, customer: &Customer) -> Result<()> {
        tx.insert_customer(&to_row(customer)).await?;
        metrics::counter!("repository_writes", "entity" => ENTITY).increment(1);
        Ok(())
    }

    pub async fn update_in(&self, tx: &mut S::Tx, customer: &Customer) -> Result<()> {
        let affected = tx.update_customer(&to_row(customer)).await?;
        if affected == 0 {
            return Err(RepositoryError::not_found(ENTITY, customer.id()));
        }
        metrics::counter!("repository_writes", "entity" => ENTITY).increment(1);
        Ok(())
    }

    pub async fn find_in(&self, tx: &mut S::Tx, id: &EntityId) -> Result<Customer> {
        let row = tx
            .find_customer(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;
        from_row(row)
    }

    pub async fn find_all_in(&self, tx: &mut S::Tx) -> Result<Vec<Customer>> {
        tx.find_all_customers()
            .await?
            .into_iter()
            .map(from_row)
            .collect()
    }
}

#[async_trait]
impl<S: Store> Repository<Customer> for CustomerRepository<S> {
    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    async fn create(&self, customer: &Customer) -> Result<()> {
        let mut tx = self.store.begin().await?;
        self.create_in(&mut tx, customer).await?;
        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    async fn update(&self, customer: &Customer) -> Result<()> {
        let mut tx = self.store.begin().await?;
        self.update_in(&mut tx, customer).await?;
        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &EntityId) -> Result<Customer> {
        let mut tx = self.store.begin().await?;
        let customer = self.find_in(&mut tx, id).await?;
        tx.commit().await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Customer>> {
        let mut tx = self.store.begin().await?;
        let customers = self.find_all_in(&mut tx).await?;
        tx.commit().await?;
        Ok(customers)
    }
}

fn to_row(customer: &Customer) -> CustomerRow {
    let address = customer.address();
    CustomerRow {
        id: customer.id().clone(),
        name: customer.name().to_string(),
        street: address.map(|a| a.street().to_string()),
        number: address.map(Address::number),
        zipcode: address.map(|a| a.zip().to_string()),
        city: address.map(|a| a.city().to_string()),
        active: customer.is_active(),
        reward_points: customer.reward_points(),
    }
}

fn from_row(row: CustomerRow) -> Result<Customer> {
    let id = row.id.clone();
    let invalid = |e| RepositoryError::invalid_row(ENTITY, &id, e);

    let mut customer = Customer::new(row.id, row.name).map_err(invalid)?;
    match (row.street, row.number, row.zipcode, row.city) {
        (Some(street), Some(number), Some(zip), Some(city)) => {
            let address = Address::new(street, number, zip, city).map_err(invalid)?;
            customer.change_address(address);
        }
        (None, None, None, None) => {}
        _ => {
            return Err(RepositoryError::Mapping {
                entity: ENTITY,
                id: id.clone(),
                reason: "address columns are partially set".to_string(),
            });
        }
    }
    if row.active {
        customer.activate().map_err(invalid)?;
    }
    customer
        .add_reward_points(row.reward_points)
        .map_err(invalid)?;
    Ok(customer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_mapping_round_trips() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();
        customer.change_address(Address::new("Street 1", 1, "Zip 1", "City 1").unwrap());
        customer.activate().unwrap();
        customer.add_reward_points(42).unwrap();

        let row = to_row(&customer);
        assert_eq!(row.zipcode.as_deref(), Some("Zip 1"));
        assert_eq!(from_row(row).unwrap(), customer);
    }

    #[test]
    fn customer_without_address_maps_to_null_columns() {
        let customer = Customer::new("c1", "Customer 1").unwrap();
        let row = to_row(&customer);
        assert!(row.street.is_none() && row.number.is_none());
        assert_eq!(from_row(row).unwrap(), customer);
    }

    #[test]
    fn partial_address_columns_are_rejected() {
        let mut row = to_row(&Customer::new("c1", "Customer 1").unwrap());
        row.street = Some("Street 1".to_string());
        assert!(matches!(
            from_row(row),
            Err(RepositoryError::Mapping { .. })
        ));
    }

    #[test]
    fn active_row_without_address_is_rejected() {
        let mut row = to_row(&Customer::new("c1", "Customer 1").unwrap());
        row.active = true;
        assert!(matches!(
            from_row(row),
            Err(RepositoryError::Mapping { .. })
        ));
    }
}
