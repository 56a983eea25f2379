use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::{Event, EventHandler, HandlerError};

/// Errors raised while notifying handlers.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed. Handlers registered after it were not invoked.
    #[error("Handler '{handler}' failed on {event_name}: {source}")]
    HandlerFault {
        event_name: String,
        handler: &'static str,
        #[source]
        source: HandlerError,
    },
}

/// Registry of event handlers keyed by event name.
///
/// Each dispatcher owns its own registry; there is no process-wide instance.
/// Handlers for one event name run in registration order. Registering the
/// same handler twice is allowed and makes it run twice.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to the list for `event_name`.
    pub fn register(&mut self, event_name: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let event_name = event_name.into();
        tracing::debug!(event_name = %event_name, handler = handler.name(), "handler registered");
        self.handlers.entry(event_name).or_default().push(handler);
    }

    /// Removes every registration of `handler` (compared by identity) for
    /// `event_name`.
    ///
    /// The event name stays registered with whatever handlers remain, even
    /// when none do. Unknown names and handlers are ignored.
    pub fn unregister<H: EventHandler + ?Sized>(&mut self, event_name: &str, handler: &Arc<H>) {
        if let Some(list) = self.handlers.get_mut(event_name) {
            list.retain(|existing| {
                !std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(handler))
            });
        }
    }

    /// Removes every event name and handler.
    pub fn unregister_all(&mut self) {
        self.handlers.clear();
    }

    /// Returns the handlers registered for `event_name`.
    ///
    /// `None` means the name was never registered (or was cleared by
    /// [`unregister_all`](Self::unregister_all)); `Some(&[])` means every
    /// handler was unregistered.
    pub fn handlers(&self, event_name: &str) -> Option<&[Arc<dyn EventHandler>]> {
        self.handlers.get(event_name).map(Vec::as_slice)
    }

    /// Invokes each handler registered under the event's name, in order.
    ///
    /// The first failing handler aborts the notification and its error is
    /// returned; handlers after it are not invoked.
    #[tracing::instrument(skip(self, event), fields(event_name = %event.name()))]
    pub fn notify(&self, event: &Event) -> Result<(), DispatchError> {
        let Some(handlers) = self.handlers.get(event.name()) else {
            tracing::trace!("no handlers registered");
            return Ok(());
        };

        metrics::counter!("domain_events_dispatched").increment(1);

        for handler in handlers {
            handler
                .handle(event)
                .map_err(|source| DispatchError::HandlerFault {
                    event_name: event.name().to_string(),
                    handler: handler.name(),
                    source,
                })?;
            metrics::counter!("domain_handlers_invoked").increment(1);
        }

        tracing::debug!(handlers = handlers.len(), "event dispatched");
        Ok(())
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, handlers) in &self.handlers {
            let names: Vec<_> = handlers.iter().map(|h| h.name()).collect();
            map.entry(name, &names);
        }
        map.finish()
    }
}
