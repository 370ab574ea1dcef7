//! Product persistence boundary.
//!
//! This module defines the repository port used by the product handlers and
//! its adapters (in-memory for tests/dev, SQLite via sqlx for deployments).

pub mod in_memory;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryProductRepository;
pub use sqlite::SqliteProductRepository;
pub use r#trait::{ProductRepository, RepositoryError};

#[cfg(test)]
pub use r#trait::MockProductRepository;
