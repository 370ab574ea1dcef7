//! Infrastructure layer: mediator, handlers, storage, broker and config.

pub mod config;
pub mod event_bus;
pub mod external;
pub mod handlers;
pub mod mediator;
pub mod repository;

#[cfg(test)]
mod integration_tests;
