//! Handlers reacting to customer events.

use crate::event::{Event, EventHandler, HandlerError};

use super::{CustomerAddressChangedEvent, CustomerCreatedEvent};

/// Logs every created customer.
#[derive(Debug, Default)]
pub struct LogWhenCustomerIsCreatedHandler;

impl EventHandler for LogWhenCustomerIsCreatedHandler {
    fn name(&self) -> &'static str {
        "LogWhenCustomerIsCreatedHandler"
    }

    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        tracing::info!(event_name = event.name(), "first handler of CustomerCreated");
        Ok(())
    }
}

/// Second, independent logger for created customers.
#[derive(Debug, Default)]
pub struct LogAgainWhenCustomerIsCreatedHandler;

impl EventHandler for LogAgainWhenCustomerIsCreatedHandler {
    fn name(&self) -> &'static str {
        "LogAgainWhenCustomerIsCreatedHandler"
    }

    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        let data: CustomerCreatedEvent = event.data_as()?;
        tracing::info!(customer_id = %data.id, name = %data.name, "second handler of CustomerCreated");
        Ok(())
    }
}

/// Logs the new address of a customer.
#[derive(Debug, Default)]
pub struct LogWhenCustomerAddressIsChangedHandler;

impl EventHandler for LogWhenCustomerAddressIsChangedHandler {
    fn name(&self) -> &'static str {
        "LogWhenCustomerAddressIsChangedHandler"
    }

    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        let data: CustomerAddressChangedEvent = event.data_as()?;
        tracing::info!(
            customer_id = %data.id,
            name = %data.name,
            address = %data.address,
            "customer address changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::{Address, Customer};
    use crate::event::{DispatchError, DomainEvent};
    use crate::EventDispatcher;
    use std::sync::Arc;

    fn customer_with_address() -> Customer {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        customer.change_address(Address::new("Street 1", 123, "12345-678", "City 1").unwrap());
        customer
    }

    #[test]
    fn created_handlers_accept_created_payload() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(
            CustomerCreatedEvent::NAME,
            Arc::new(LogWhenCustomerIsCreatedHandler),
        );
        dispatcher.register(
            CustomerCreatedEvent::NAME,
            Arc::new(LogAgainWhenCustomerIsCreatedHandler),
        );

        let event = Event::from_domain(&CustomerCreatedEvent::from(&customer_with_address())).unwrap();
        assert!(dispatcher.notify(&event).is_ok());
    }

    #[test]
    fn address_changed_handler_accepts_payload() {
        let handler = LogWhenCustomerAddressIsChangedHandler;
        let data = CustomerAddressChangedEvent::from_customer(&customer_with_address()).unwrap();
        let event = Event::from_domain(&data).unwrap();
        assert!(handler.handle(&event).is_ok());
    }

    #[test]
    fn address_changed_handler_rejects_malformed_payload() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(
            CustomerAddressChangedEvent::NAME,
            Arc::new(LogWhenCustomerAddressIsChangedHandler),
        );

        let event = Event::new(
            CustomerAddressChangedEvent::NAME,
            serde_json::json!({"name": "Alex"}),
        );
        let result = dispatcher.notify(&event);
        assert!(matches!(
            result,
            Err(DispatchError::HandlerFault {
                handler: "LogWhenCustomerAddressIsChangedHandler",
                ..
            })
        ));
    }

    #[test]
    fn address_changed_event_requires_address() {
        let customer = Customer::new("1", "Customer 1").unwrap();
        assert!(CustomerAddressChangedEvent::from_customer(&customer).is_none());
    }
}
