//! Product handlers: create command, get query, and the `ProductCreated`
//! event handler that forwards to the event bus.
//!
//! ## Flow of a create
//!
//! ```text
//! CreateProductCommand
//!   → CreateProductCommandHandler: validate, persist, reply Created(id)
//!   → returns [ProductCreated]
//!   → ProductCreatedEventHandler: translate, publish to "ProductCreated"
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use catalog_core::{DomainError, ProductId};
use catalog_events::{EventBus, Handled, Message, MessageHandler};
use catalog_products::{
    CreateProductCommand, GetProductsQuery, Product, ProductCreated,
    ProductCreatedIntegrationEvent, ProductMessage, ProductMessageKind, ProductReply,
};

use crate::mediator::{DeliveryPolicy, HandlerRegistry, Mediator, RegistryError};
use crate::repository::{ProductRepository, RepositoryError};

/// Error produced by any product handler.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HandlerError {
    /// Input rejected by the domain (bad name, price, ...).
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("product `{0}` not found")]
    NotFound(ProductId),

    #[error(transparent)]
    Storage(RepositoryError),

    /// The event bus rejected an integration event.
    #[error("failed to publish integration event: {0}")]
    Publish(String),

    /// A handler was invoked with a message it does not declare.
    #[error("handler `{handler}` cannot handle `{kind}`")]
    Misrouted {
        handler: &'static str,
        kind: ProductMessageKind,
    },
}

impl From<RepositoryError> for HandlerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => HandlerError::NotFound(id),
            other => HandlerError::Storage(other),
        }
    }
}

impl HandlerError {
    fn misrouted(handler: &'static str, message: &ProductMessage) -> Self {
        HandlerError::Misrouted {
            handler,
            kind: message.kind(),
        }
    }
}

/// Mediator specialised for the products context.
pub type ProductMediator = Mediator<ProductMessage, ProductReply, HandlerError>;

/// Build the products mediator: one handler per message kind.
///
/// The repository is shared by the command and query handlers.
pub fn product_mediator<R, B>(
    repository: Arc<R>,
    bus: B,
    policy: DeliveryPolicy,
) -> Result<ProductMediator, RegistryError>
where
    R: ProductRepository + ?Sized + 'static,
    B: EventBus<ProductCreatedIntegrationEvent> + 'static,
{
    let registry = HandlerRegistry::builder()
        .register(CreateProductCommandHandler::new(Arc::clone(&repository)))?
        .register(GetProductsQueryHandler::new(repository))?
        .register(ProductCreatedEventHandler::new(bus))?
        .build();

    tracing::debug!(?registry, ?policy, "product mediator built");
    Ok(Mediator::new(registry).with_policy(policy))
}

/// Creates a product under a freshly generated identifier.
pub struct CreateProductCommandHandler<R> {
    repository: R,
}

impl<R: ProductRepository> CreateProductCommandHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    async fn create(&self, cmd: CreateProductCommand) -> Result<Handled<ProductReply, ProductMessage>, HandlerError> {
        tracing::info!(name = %cmd.name, "creating product");

        let id = ProductId::generate();
        let product = Product::new(id.clone(), cmd.name, cmd.price, cmd.inventory, cmd.category)?;

        self.repository.create(&product).await?;
        tracing::info!(product_id = %id, "product created");

        let event = ProductCreated::from_product(&product, Utc::now());
        Ok(Handled::with_events(ProductReply::Created(id), vec![event.into()]))
    }
}

#[async_trait]
impl<R: ProductRepository> MessageHandler<ProductMessage> for CreateProductCommandHandler<R> {
    type Reply = ProductReply;
    type Error = HandlerError;

    fn name(&self) -> &'static str {
        "CreateProductCommandHandler"
    }

    fn supported_kinds(&self) -> &[ProductMessageKind] {
        &[ProductMessageKind::CreateProduct]
    }

    async fn handle(&self, message: ProductMessage) -> Result<Handled<ProductReply, ProductMessage>, HandlerError> {
        match message {
            ProductMessage::CreateProduct(cmd) => self.create(cmd).await,
            other => Err(HandlerError::misrouted(self.name(), &other)),
        }
    }
}

/// Point lookup of a single product.
pub struct GetProductsQueryHandler<R> {
    repository: R,
}

impl<R: ProductRepository> GetProductsQueryHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    async fn get(&self, query: GetProductsQuery) -> Result<Handled<ProductReply, ProductMessage>, HandlerError> {
        tracing::debug!(product_id = %query.id, "fetching product");

        let product = self.repository.read(&query.id).await.inspect_err(|err| {
            tracing::debug!(product_id = %query.id, error = %err, "product lookup failed");
        })?;

        Ok(Handled::reply(ProductReply::Found(product)))
    }
}

#[async_trait]
impl<R: ProductRepository> MessageHandler<ProductMessage> for GetProductsQueryHandler<R> {
    type Reply = ProductReply;
    type Error = HandlerError;

    fn name(&self) -> &'static str {
        "GetProductsQueryHandler"
    }

    fn supported_kinds(&self) -> &[ProductMessageKind] {
        &[ProductMessageKind::GetProducts]
    }

    async fn handle(&self, message: ProductMessage) -> Result<Handled<ProductReply, ProductMessage>, HandlerError> {
        match message {
            ProductMessage::GetProducts(query) => self.get(query).await,
            other => Err(HandlerError::misrouted(self.name(), &other)),
        }
    }
}

/// Translates `ProductCreated` into its integration event and publishes it.
pub struct ProductCreatedEventHandler<B> {
    bus: B,
}

impl<B: EventBus<ProductCreatedIntegrationEvent>> ProductCreatedEventHandler<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    async fn forward(&self, event: ProductCreated) -> Result<Handled<ProductReply, ProductMessage>, HandlerError> {
        let integration = ProductCreatedIntegrationEvent::from(&event);
        tracing::info!(
            product_id = %event.product_id,
            queue = ProductCreatedIntegrationEvent::QUEUE,
            "publishing integration event"
        );

        self.bus
            .publish(integration)
            .await
            .map_err(|err| HandlerError::Publish(err.to_string()))?;

        Ok(Handled::reply(ProductReply::Accepted))
    }
}

#[async_trait]
impl<B: EventBus<ProductCreatedIntegrationEvent>> MessageHandler<ProductMessage> for ProductCreatedEventHandler<B> {
    type Reply = ProductReply;
    type Error = HandlerError;

    fn name(&self) -> &'static str {
        "ProductCreatedEventHandler"
    }

    fn supported_kinds(&self) -> &[ProductMessageKind] {
        &[ProductMessageKind::ProductCreated]
    }

    async fn handle(&self, message: ProductMessage) -> Result<Handled<ProductReply, ProductMessage>, HandlerError> {
        match message {
            ProductMessage::ProductCreated(event) => self.forward(event).await,
            other => Err(HandlerError::misrouted(self.name(), &other)),
        }
    }
}
