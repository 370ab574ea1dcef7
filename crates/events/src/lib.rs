//! `catalog-events`: messaging mechanics shared by the domain and infrastructure.
//!
//! - [`event`] / [`integration`]: domain events vs. events meant for external consumers
//! - [`message`] / [`handler`]: tagged messages and the handler contract used by the mediator
//! - [`bus`]: the outbound event bus port, plus an in-memory implementation

pub mod bus;
pub mod event;
pub mod handler;
pub mod in_memory_bus;
pub mod integration;
pub mod message;

pub use bus::EventBus;
pub use event::DomainEvent;
pub use handler::MessageHandler;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus, Subscription};
pub use integration::IntegrationEvent;
pub use message::{Handled, Message};
