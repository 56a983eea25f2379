//! Order aggregate, its items and repository.

mod aggregate;
mod item;
mod repository;

pub use aggregate::Order;
pub use item::{MAX_QUANTITY, OrderItem};
pub use repository::OrderRepository;
