//! Integration events: domain events translated for external systems.

use serde::Serialize;

/// An event published to an external transport.
///
/// The serialized form is JSON keyed by the struct's field names, and the
/// destination queue is named after the event type.
pub trait IntegrationEvent: Serialize + Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Name of the queue/topic this event is delivered to.
    fn queue_name(&self) -> &'static str;

    /// Encode the wire payload.
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
