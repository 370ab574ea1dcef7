//! SQLite-backed product repository (sqlx).
//!
//! ## Error Mapping
//!
//! | sqlx error | RepositoryError |
//! |------------|-----------------|
//! | Database (unique violation) | `Duplicate` |
//! | Database (other) | `Unavailable` |
//! | Io / Tls / PoolTimedOut / PoolClosed | `Unavailable` |
//! | ColumnDecode / Decode / other | `Corrupt` |
//!
//! The table is created if missing; its shape is never migrated.

use core::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::instrument;

use catalog_core::{Entity, ProductId};
use catalog_products::Product;

use super::r#trait::{ProductRepository, RepositoryError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    inventory INTEGER NOT NULL,
    category TEXT NOT NULL
)
"#;

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: f64,
    inventory: i64,
    category: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = ProductId::from_str(&row.id)
            .map_err(|e| RepositoryError::Corrupt(format!("id: {e}")))?;
        Product::new(id, row.name, row.price, row.inventory, row.category)
            .map_err(|e| RepositoryError::Corrupt(e.to_string()))
    }
}

/// SQLite-backed product repository.
///
/// Uses a sqlx connection pool, so one instance is shared by all requests.
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Connect to `url` (e.g. `sqlite://products.db`), creating the database
    /// file and the `products` table if needed.
    pub async fn connect(url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepositoryError::Unavailable(format!("invalid database url: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, ensuring the schema exists.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, RepositoryError> {
        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .map_err(|e| map_sqlx_error("create_table", e))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id()), err)]
    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO products (id, name, price, inventory, category) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(product.id().as_str())
        .bind(product.name())
        .bind(product.price())
        .bind(product.inventory())
        .bind(product.category())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(RepositoryError::Duplicate(product.id().clone()))
            }
            Err(e) => Err(map_sqlx_error("create", e)),
        }
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn read(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, inventory, category FROM products WHERE id = ?1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("read", e))?;

        match row {
            Some(row) => Product::try_from(row),
            None => Err(RepositoryError::NotFound(id.clone())),
        }
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            RepositoryError::Corrupt(format!("{operation}: {err}"))
        }
        _ => RepositoryError::Unavailable(format!("{operation}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repository() -> SqliteProductRepository {
        // A single long-lived connection: every `sqlite::memory:` connection is
        // its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteProductRepository::from_pool(pool).await.unwrap()
    }

    fn widget() -> Product {
        Product::new(ProductId::generate(), "Widget", 9.99, 50, "Hardware").unwrap()
    }

    #[tokio::test]
    async fn read_returns_the_stored_product() {
        let repo = repository().await;
        let product = widget();

        repo.create(&product).await.unwrap();

        assert_eq!(repo.read(product.id()).await.unwrap(), product);
    }

    #[tokio::test]
    async fn read_of_unknown_id_is_not_found() {
        let repo = repository().await;
        let id: ProductId = "nonexistent-id".parse().unwrap();

        assert_eq!(repo.read(&id).await, Err(RepositoryError::NotFound(id)));
    }

    #[tokio::test]
    async fn duplicate_id_maps_to_duplicate() {
        let repo = repository().await;
        let product = widget();
        repo.create(&product).await.unwrap();

        assert_eq!(
            repo.create(&product).await,
            Err(RepositoryError::Duplicate(product.id().clone()))
        );
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let repo = repository().await;
        let product = widget();
        repo.create(&product).await.unwrap();

        let again = SqliteProductRepository::from_pool(repo.pool.clone()).await.unwrap();
        assert_eq!(again.read(product.id()).await.unwrap(), product);
    }

    #[tokio::test]
    async fn inventory_beyond_32_bits_survives_storage() {
        let repo = repository().await;
        let product = Product::new(ProductId::generate(), "Bolt", 0.01, 5_000_000_000, "").unwrap();
        repo.create(&product).await.unwrap();

        assert_eq!(repo.read(product.id()).await.unwrap().inventory(), 5_000_000_000);
    }

    #[tokio::test]
    async fn rows_violating_invariants_are_reported_as_corrupt() {
        let repo = repository().await;
        sqlx::query("INSERT INTO products (id, name, price, inventory, category) VALUES ('bad', 'Widget', 1.0, -5, 'c')")
            .execute(&repo.pool)
            .await
            .unwrap();

        let err = repo.read(&"bad".parse().unwrap()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Corrupt(_)));
    }

    #[tokio::test]
    async fn update_and_delete_are_unsupported() {
        let repo = repository().await;
        let product = widget();

        assert_eq!(
            repo.update(product.id(), &product).await,
            Err(RepositoryError::Unsupported("update"))
        );
        assert_eq!(
            repo.delete(product.id()).await,
            Err(RepositoryError::Unsupported("delete"))
        );
    }
}
