use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductId;
use catalog_products::Product;

/// Repository operation error.
///
/// These are **infrastructure errors** (storage, uniqueness, availability) as
/// opposed to domain errors (validation).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No product is stored under this identifier.
    #[error("product `{0}` not found")]
    NotFound(ProductId),

    /// A product with this identifier already exists.
    #[error("product `{0}` already exists")]
    Duplicate(ProductId),

    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be turned back into a product.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// The operation is declared but not supported by this service.
    #[error("operation `{0}` is not supported")]
    Unsupported(&'static str),
}

/// Storage port for products.
///
/// ## Semantics
///
/// - `create` inserts a new record; an existing id is a `Duplicate`
/// - `read` returns the stored product or `NotFound` (never a placeholder)
/// - `update` / `delete` are part of the contract but intentionally not
///   implemented: the defaults return `Unsupported` without touching storage
///
/// Each call is atomic on its own; there are no multi-call transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn read(&self, id: &ProductId) -> Result<Product, RepositoryError>;

    async fn update(&self, _id: &ProductId, _product: &Product) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unsupported("update"))
    }

    async fn delete(&self, _id: &ProductId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unsupported("delete"))
    }
}

#[async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        (**self).create(product).await
    }

    async fn read(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        (**self).read(id).await
    }

    async fn update(&self, id: &ProductId, product: &Product) -> Result<(), RepositoryError> {
        (**self).update(id, product).await
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        (**self).delete(id).await
    }
}
