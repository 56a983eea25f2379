//! Storage accessor for the shop domain.
//!
//! Repositories reach the database only through the narrow contract defined
//! here: per-table CRUD operations ([`RowAccess`]) executed inside a
//! transaction opened by a [`Store`]. Two backends are provided: an
//! in-memory store for tests and a PostgreSQL store built on sqlx.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod row;
pub mod store;

pub use common::EntityId;
pub use error::{Result, StorageError};
pub use memory::{InMemoryStore, InMemoryTransaction};
pub use postgres::{PgStore, PgTransaction};
pub use row::{CustomerRow, OrderItemRow, OrderRow, ProductRow};
pub use store::{RowAccess, Store, Transaction};
