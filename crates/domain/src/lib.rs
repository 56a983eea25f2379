//! Domain layer for the shop.
//!
//! This crate provides:
//! - Entities and value objects: `Customer`/`Address`, `Product`, `Order`/`OrderItem`
//! - Domain events with a synchronous, in-process `EventDispatcher`
//! - Repositories mapping aggregates to rows through the `storage` crate

pub mod customer;
pub mod error;
pub mod event;
pub mod money;
pub mod order;
pub mod product;
pub mod repository;

pub use common::EntityId;
pub use customer::{
    Address, Customer, CustomerAddressChangedEvent, CustomerCreatedEvent, CustomerRepository,
    LogAgainWhenCustomerIsCreatedHandler, LogWhenCustomerAddressIsChangedHandler,
    LogWhenCustomerIsCreatedHandler,
};
pub use error::DomainError;
pub use event::{DispatchError, DomainEvent, Event, EventDispatcher, EventHandler, HandlerError};
pub use money::Money;
pub use order::{Order, OrderItem, OrderRepository};
pub use product::{Product, ProductCreatedEvent, ProductRepository, SendEmailWhenProductIsCreatedHandler};
pub use repository::{Repository, RepositoryError};
