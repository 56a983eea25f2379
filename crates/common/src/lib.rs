//! Shared types used across the storage and domain crates.

mod types;

pub use types::EntityId;
