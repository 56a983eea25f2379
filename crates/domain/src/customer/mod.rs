//! Customer entity, its address value object, events and repository.

mod address;
mod entity;
mod events;
mod handlers;
mod repository;

pub use address::Address;
pub use entity::Customer;
pub use events::{CustomerAddressChangedEvent, CustomerCreatedEvent};
pub use handlers::{
    LogAgainWhenCustomerIsCreatedHandler, LogWhenCustomerAddressIsChangedHandler,
    LogWhenCustomerIsCreatedHandler,
};
pub use repository::CustomerRepository;
