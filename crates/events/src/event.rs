use chrono::{DateTime, Utc};

/// A fact recorded in-process as the result of a business operation.
///
/// Domain events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
/// - consumed in the same process that produced them; they are never persisted
pub trait DomainEvent: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "products.product.created").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32 {
        1
    }

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
