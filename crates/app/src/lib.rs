//! Wiring for the shop demonstration binary.
//!
//! Builds the event dispatcher with the stock handlers and drives a short
//! flow through the repositories against whichever store is configured.

pub mod config;
pub mod demo;
pub mod error;

pub use config::Config;
pub use demo::{Summary, default_dispatcher, run};
pub use error::{AppError, Result};
