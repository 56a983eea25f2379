//! Domain events and their synchronous in-process dispatch.

mod dispatcher;
mod handler;
mod record;

pub use dispatcher::{DispatchError, EventDispatcher};
pub use handler::{EventHandler, HandlerError};
pub use record::{DomainEvent, Event};
