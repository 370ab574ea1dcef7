//! Event publishing abstraction (outbound port).
//!
//! The bus is the **transport layer** for integration events once a business
//! operation has completed. It is intentionally lightweight:
//!
//! - **Fire-and-forget**: no acknowledgment is tracked and nothing is retried
//! - **No ordering guarantees** across publishers
//! - **No persistence**: a failed publish is reported to the caller and the
//!   event is gone
//!
//! What the caller does with a failed publish (ignore it, or fail the
//! request) is the mediator's delivery policy, not the bus's concern.

use std::sync::Arc;

use async_trait::async_trait;

/// Transport-agnostic publisher.
///
/// Implementations exist for in-process fan-out (tests/dev) and for a real
/// broker (Redis lists). The trait requires `Send + Sync` so one bus instance
/// can be shared by every request.
#[async_trait]
pub trait EventBus<M: Send + 'static>: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    async fn publish(&self, message: M) -> Result<(), Self::Error>;
}

#[async_trait]
impl<M, B> EventBus<M> for Arc<B>
where
    M: Send + 'static,
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    async fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message).await
    }
}
