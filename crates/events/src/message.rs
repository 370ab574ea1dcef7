//! Tagged messages routed by the mediator.
//!
//! A message type is a closed enum (commands, queries and domain events of one
//! bounded context); its `Kind` is the dispatch key. Routing never inspects
//! payloads, only the tag.

/// A routable message.
pub trait Message: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Discriminant used as the dispatch key.
    type Kind: Copy
        + Eq
        + core::hash::Hash
        + core::fmt::Debug
        + core::fmt::Display
        + Send
        + Sync
        + 'static;

    fn kind(&self) -> Self::Kind;
}

/// Result of handling a message: the reply for the caller plus any follow-on
/// events the mediator must dispatch afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Handled<R, M> {
    reply: R,
    events: Vec<M>,
}

impl<R, M> Handled<R, M> {
    /// A reply with no follow-on events.
    pub fn reply(reply: R) -> Self {
        Self {
            reply,
            events: Vec::new(),
        }
    }

    pub fn with_events(reply: R, events: Vec<M>) -> Self {
        Self { reply, events }
    }

    pub fn reply_ref(&self) -> &R {
        &self.reply
    }

    pub fn events(&self) -> &[M] {
        &self.events
    }

    pub fn into_parts(self) -> (R, Vec<M>) {
        (self.reply, self.events)
    }
}
