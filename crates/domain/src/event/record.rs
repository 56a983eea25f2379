use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

/// Trait for typed domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize {
    /// The event name handlers are registered under.
    const NAME: &'static str;
}

/// A dispatchable event: a name, the time it occurred and an opaque payload.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    name: String,
    occurred_at: DateTime<Utc>,
    data: serde_json::Value,
}

impl Event {
    /// Creates an event that occurred now.
    pub fn new(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            occurred_at: Utc::now(),
            data,
        }
    }

    /// Creates an event from a typed domain event, serializing it as the payload.
    pub fn from_domain<E: DomainEvent>(event: &E) -> Result<Self, serde_json::Error> {
        Ok(Self::new(E::NAME, serde_json::to_value(event)?))
    }

    /// Returns the event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns when the event occurred.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the raw payload.
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Deserializes the payload into a typed value.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
}
