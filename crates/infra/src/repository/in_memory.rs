use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::{Entity, ProductId};
use catalog_products::Product;

use super::r#trait::{ProductRepository, RepositoryError};

/// In-memory product store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;

        if products.contains_key(product.id()) {
            return Err(RepositoryError::Duplicate(product.id().clone()));
        }

        products.insert(product.id().clone(), product.clone());
        Ok(())
    }

    async fn read(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let products = self
            .products
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;

        products
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }
}
