//! Product entity, events and repository.

mod entity;
mod events;
mod handlers;
mod repository;

pub use entity::Product;
pub use events::ProductCreatedEvent;
pub use handlers::SendEmailWhenProductIsCreatedHandler;
pub use repository::ProductRepository;
