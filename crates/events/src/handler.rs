use async_trait::async_trait;

use crate::message::{Handled, Message};

/// Handles one or more kinds of message (command, query or event handler).
///
/// Each handler declares the closed set of kinds it supports; the registry
/// uses that set as the routing table, so a handler is only ever invoked with
/// messages of those kinds.
///
/// Dependencies (repositories, buses) are passed to the handler's constructor,
/// and handlers are built once and shared across requests. Handlers must not
/// keep per-request state.
///
/// Handlers never dispatch other messages themselves: follow-on domain events
/// are returned in [`Handled`] and the mediator dispatches them.
#[async_trait]
pub trait MessageHandler<M: Message>: Send + Sync {
    type Reply: Send + 'static;
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    /// Human-readable handler name (used in logs and registry errors).
    fn name(&self) -> &'static str;

    /// Message kinds this handler accepts.
    fn supported_kinds(&self) -> &[M::Kind];

    async fn handle(&self, message: M) -> Result<Handled<Self::Reply, M>, Self::Error>;
}
