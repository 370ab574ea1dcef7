//! Explicit routing table from message kind to handler.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use catalog_events::{Message, MessageHandler};

/// A type-erased, shareable handler producing replies `R` and errors `E`.
pub type SharedHandler<M, R, E> = Arc<dyn MessageHandler<M, Reply = R, Error = E>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two handlers claim the same message kind.
    #[error("message kind `{kind}` is already handled by `{existing}` (attempted: `{attempted}`)")]
    DuplicateHandler {
        kind: String,
        existing: &'static str,
        attempted: &'static str,
    },

    /// A handler declared no supported kinds and could never be invoked.
    #[error("handler `{0}` declares no supported message kinds")]
    NoSupportedKinds(&'static str),
}

/// Bounds shared by every handler error type.
pub trait HandlerFailure: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static {}

impl<T> HandlerFailure for T where T: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static {}

/// Immutable kind → handler table, built once at startup.
///
/// Each kind maps to exactly one handler, so dispatch is deterministic.
pub struct HandlerRegistry<M: Message, R: Send + 'static, E: HandlerFailure> {
    handlers: HashMap<M::Kind, SharedHandler<M, R, E>>,
}

impl<M, R, E> HandlerRegistry<M, R, E>
where
    M: Message,
    R: Send + 'static,
    E: HandlerFailure,
{
    pub fn builder() -> HandlerRegistryBuilder<M, R, E> {
        HandlerRegistryBuilder {
            handlers: HashMap::new(),
        }
    }

    pub fn lookup(&self, kind: M::Kind) -> Option<&SharedHandler<M, R, E>> {
        self.handlers.get(&kind)
    }

    pub fn contains(&self, kind: M::Kind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = M::Kind> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<M: Message, R: Send + 'static, E: HandlerFailure> core::fmt::Debug for HandlerRegistry<M, R, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(kind, h)| (kind, h.name())))
            .finish()
    }
}

/// Builder that rejects ambiguous registrations.
pub struct HandlerRegistryBuilder<M: Message, R: Send + 'static, E: HandlerFailure> {
    handlers: HashMap<M::Kind, SharedHandler<M, R, E>>,
}

impl<M, R, E> HandlerRegistryBuilder<M, R, E>
where
    M: Message,
    R: Send + 'static,
    E: HandlerFailure,
{
    /// Register `handler` for every kind it declares.
    ///
    /// Fails if any declared kind is already taken, or if the handler declares
    /// no kinds at all. The builder is consumed either way, so a failed
    /// registration aborts the whole wiring.
    pub fn register<H>(mut self, handler: H) -> Result<Self, RegistryError>
    where
        H: MessageHandler<M, Reply = R, Error = E> + 'static,
    {
        let shared: SharedHandler<M, R, E> = Arc::new(handler);
        let kinds = shared.supported_kinds().to_vec();

        if kinds.is_empty() {
            return Err(RegistryError::NoSupportedKinds(shared.name()));
        }

        for kind in &kinds {
            if let Some(existing) = self.handlers.get(kind) {
                return Err(RegistryError::DuplicateHandler {
                    kind: kind.to_string(),
                    existing: existing.name(),
                    attempted: shared.name(),
                });
            }
        }

        for kind in kinds {
            self.handlers.insert(kind, Arc::clone(&shared));
        }

        Ok(self)
    }

    pub fn build(self) -> HandlerRegistry<M, R, E> {
        HandlerRegistry {
            handlers: self.handlers,
        }
    }
}

impl<M: Message, R: Send + 'static, E: HandlerFailure> core::fmt::Debug
    for HandlerRegistryBuilder<M, R, E>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(kind, h)| (kind, h.name())))
            .finish()
    }
}
