//! Service wiring: repository + event bus + mediator, built once per process.

use std::sync::Arc;

use thiserror::Error;

use catalog_auth::TokenValidationError;
use catalog_core::ProductId;
use catalog_events::{EventBus, InMemoryEventBus, Message};
use catalog_infra::config::{AppConfig, RepositoryBackend};
use catalog_infra::event_bus::{ConfiguredBusError, ConfiguredEventBus};
use catalog_infra::handlers::{HandlerError, ProductMediator, product_mediator};
use catalog_infra::mediator::{DeliveryPolicy, DispatchError, RegistryError};
use catalog_infra::repository::{
    InMemoryProductRepository, ProductRepository, RepositoryError, SqliteProductRepository,
};
use catalog_products::{
    CreateProductCommand, GetProductsQuery, Product, ProductCreatedIntegrationEvent,
    ProductMessage, ProductMessageKind,
};

/// Failure reported by the mediator for a product request.
pub type ProductDispatchError = DispatchError<ProductMessageKind, HandlerError>;

/// Errors that prevent the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("storage: {0}")]
    Storage(#[from] RepositoryError),

    #[error("event bus: {0}")]
    EventBus(#[from] ConfiguredBusError),

    #[error("handler registry: {0}")]
    Registry(#[from] RegistryError),

    #[error("token introspection: {0}")]
    Auth(#[from] TokenValidationError),
}

/// Everything request handlers need, shared behind an `Arc`.
pub struct AppServices {
    mediator: ProductMediator,
}

impl AppServices {
    pub fn new(mediator: ProductMediator) -> Self {
        Self { mediator }
    }

    /// Wire the configured repository and event bus.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let repository: Arc<dyn ProductRepository> = match &config.repository {
            RepositoryBackend::InMemory => {
                tracing::warn!("using in-memory product repository; data is lost on restart");
                Arc::new(InMemoryProductRepository::new())
            }
            RepositoryBackend::Sqlite { url } => {
                tracing::info!(%url, "using sqlite product repository");
                Arc::new(SqliteProductRepository::connect(url).await?)
            }
        };

        let bus = ConfiguredEventBus::<ProductCreatedIntegrationEvent>::from_config(&config.event_bus)?;
        Self::with_parts(repository, bus, config.delivery)
    }

    /// In-memory repository and bus (dev/tests).
    pub fn in_memory() -> Result<Self, StartupError> {
        Self::with_parts(
            Arc::new(InMemoryProductRepository::new()),
            InMemoryEventBus::<ProductCreatedIntegrationEvent>::new(),
            DeliveryPolicy::default(),
        )
    }

    pub fn with_parts<R, B>(repository: Arc<R>, bus: B, policy: DeliveryPolicy) -> Result<Self, StartupError>
    where
        R: ProductRepository + ?Sized + 'static,
        B: EventBus<ProductCreatedIntegrationEvent> + 'static,
    {
        Ok(Self::new(product_mediator(repository, bus, policy)?))
    }

    pub fn mediator(&self) -> &ProductMediator {
        &self.mediator
    }

    pub async fn create_product(&self, cmd: CreateProductCommand) -> Result<ProductId, ProductDispatchError> {
        let message = ProductMessage::from(cmd);
        let kind = message.kind();
        let reply = self.mediator.handle(message).await?;
        reply.into_created().ok_or_else(|| unexpected_reply(kind))
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductDispatchError> {
        let message = ProductMessage::from(GetProductsQuery { id });
        let kind = message.kind();
        let reply = self.mediator.handle(message).await?;
        reply.into_found().ok_or_else(|| unexpected_reply(kind))
    }
}

fn unexpected_reply(kind: ProductMessageKind) -> ProductDispatchError {
    tracing::error!(%kind, "handler returned a reply of the wrong shape");
    DispatchError::Handler(HandlerError::Misrouted {
        handler: "AppServices",
        kind,
    })
}

