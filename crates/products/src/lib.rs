//! Products domain module.
//!
//! This crate contains the product entity, the messages that act on it and the
//! events it produces, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage). Handlers that talk to storage live in `catalog-infra`.

pub mod event;
pub mod integration;
pub mod message;
pub mod product;

pub use event::ProductCreated;
pub use integration::ProductCreatedIntegrationEvent;
pub use message::{
    CreateProductCommand, GetProductsQuery, ProductMessage, ProductMessageKind, ProductReply,
};
pub use product::Product;
