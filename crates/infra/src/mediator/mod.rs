//! In-process message dispatch (mediator).
//!
//! ## Dispatch Flow
//!
//! ```text
//! message
//!   ↓
//! 1. Look up the single handler registered for `message.kind()`
//!   ↓
//! 2. Invoke it → Handled { reply, events }
//!   ↓
//! 3. For each returned event (in order): `send(event)`
//!   ↓
//! 4. Return the reply
//! ```
//!
//! Step 3 is a plain loop over the returned list. Event handlers may not
//! cascade further: any follow-on events they return are dropped, so a command
//! causes at most one level of event dispatch.
//!
//! ## Misses
//!
//! - `handle` on a kind with no handler fails with `DispatchError::Unsupported`
//! - `send` on a kind with no handler is a no-op (an event nobody listens to)
//!
//! ## Event Delivery Failures
//!
//! Governed by [`DeliveryPolicy`]. Either way, whatever the command handler
//! already persisted stays persisted.

pub mod registry;

use core::str::FromStr;

use thiserror::Error;
use tracing::instrument;

use catalog_events::Message;

pub use registry::{
    HandlerFailure, HandlerRegistry, HandlerRegistryBuilder, RegistryError, SharedHandler,
};

#[derive(Debug, Error)]
pub enum DispatchError<K, E>
where
    K: core::fmt::Debug + core::fmt::Display,
    E: core::fmt::Debug + core::fmt::Display,
{
    /// No handler is registered for this message kind.
    #[error("unsupported operation: no handler registered for `{0}`")]
    Unsupported(K),

    /// The handler for the message itself failed.
    #[error("{0}")]
    Handler(E),

    /// A follow-on event could not be delivered (strict delivery only).
    #[error("delivery of `{kind}` failed: {error}")]
    EventDelivery { kind: K, error: E },
}

/// What `handle` does when one of the command's events fails to deliver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Log the failure and still return the command's reply.
    #[default]
    BestEffort,
    /// Fail the command with `DispatchError::EventDelivery`.
    Strict,
}

impl FromStr for DeliveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best-effort" | "best_effort" => Ok(DeliveryPolicy::BestEffort),
            "strict" => Ok(DeliveryPolicy::Strict),
            other => Err(format!(
                "unknown delivery policy `{other}` (expected `best-effort` or `strict`)"
            )),
        }
    }
}

/// Routes messages to their registered handler and drains returned events.
///
/// Built once (registry + policy) and shared across requests; it holds no
/// per-request state.
pub struct Mediator<M: Message, R: Send + 'static, E: HandlerFailure> {
    registry: HandlerRegistry<M, R, E>,
    policy: DeliveryPolicy,
}

impl<M, R, E> Mediator<M, R, E>
where
    M: Message,
    R: Send + 'static,
    E: HandlerFailure,
{
    pub fn new(registry: HandlerRegistry<M, R, E>) -> Self {
        Self {
            registry,
            policy: DeliveryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DeliveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    pub fn registry(&self) -> &HandlerRegistry<M, R, E> {
        &self.registry
    }

    /// Dispatch a command/query and return its handler's reply.
    #[instrument(skip_all, fields(kind = %message.kind()))]
    pub async fn handle(&self, message: M) -> Result<R, DispatchError<M::Kind, E>> {
        let kind = message.kind();
        let handler = self.registry.lookup(kind).ok_or_else(|| {
            tracing::warn!("no handler registered");
            DispatchError::Unsupported(kind)
        })?;

        tracing::debug!(handler = handler.name(), "dispatching");
        let (reply, events) = handler
            .handle(message)
            .await
            .map_err(DispatchError::Handler)?
            .into_parts();

        for event in events {
            let event_kind = event.kind();
            if let Err(err) = self.send(event).await {
                match self.policy {
                    DeliveryPolicy::BestEffort => {
                        tracing::error!(event = %event_kind, error = %err, "event delivery failed; continuing");
                    }
                    DeliveryPolicy::Strict => return Err(err),
                }
            }
        }

        Ok(reply)
    }

    /// Dispatch an event, discarding the handler's reply.
    #[instrument(skip_all, fields(kind = %event.kind()))]
    pub async fn send(&self, event: M) -> Result<(), DispatchError<M::Kind, E>> {
        let kind = event.kind();
        let Some(handler) = self.registry.lookup(kind) else {
            tracing::debug!("no handler registered; event dropped");
            return Ok(());
        };

        let handled = handler
            .handle(event)
            .await
            .map_err(|error| DispatchError::EventDelivery { kind, error })?;

        if !handled.events().is_empty() {
            tracing::warn!(
                handler = handler.name(),
                dropped = handled.events().len(),
                "event handlers may not emit follow-on events; dropped"
            );
        }

        Ok(())
    }
}

impl<M: Message, R: Send + 'static, E: HandlerFailure> core::fmt::Debug for Mediator<M, R, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mediator")
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .finish()
    }
}
