use crate::event::{Event, EventHandler, HandlerError};

use super::ProductCreatedEvent;

/// Sends a notification e-mail when a product is created.
///
/// Delivery is simulated with a log line.
#[derive(Debug, Default)]
pub struct SendEmailWhenProductIsCreatedHandler;

impl EventHandler for SendEmailWhenProductIsCreatedHandler {
    fn name(&self) -> &'static str {
        "SendEmailWhenProductIsCreatedHandler"
    }

    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        let data: ProductCreatedEvent = event.data_as()?;
        tracing::info!(product = %data.name, price = %data.price, "sending product created e-mail");
        Ok(())
    }
}
