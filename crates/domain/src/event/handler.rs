use super::Event;

/// Error returned by a failing handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A unit of work triggered by an event.
///
/// Handlers are invoked synchronously by the
/// [`EventDispatcher`](super::EventDispatcher) and may perform arbitrary I/O.
pub trait EventHandler: Send + Sync {
    /// Returns the name of this handler, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Handles a single event.
    fn handle(&self, event: &Event) -> Result<(), HandlerError>;
}
