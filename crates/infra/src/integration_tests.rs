//! End-to-end tests for the product pipeline.
//!
//! Tests: Command → Mediator → Repository → ProductCreated → EventBus
//!
//! Verifies:
//! - A create persists the product and publishes exactly one integration event
//! - Queries read back exactly what was stored
//! - Delivery policy decides whether a broken bus fails the command

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use sqlx::sqlite::SqlitePoolOptions;

    use catalog_core::{Entity, ProductId};
    use catalog_events::{EventBus, InMemoryEventBus, IntegrationEvent};
    use catalog_products::{
        CreateProductCommand, GetProductsQuery, ProductCreatedIntegrationEvent, ProductMessage,
        ProductMessageKind,
    };

    use crate::handlers::{HandlerError, ProductMediator, product_mediator};
    use crate::mediator::{DeliveryPolicy, DispatchError};
    use crate::repository::{
        InMemoryProductRepository, ProductRepository, RepositoryError, SqliteProductRepository,
    };

    type IntegrationBus = Arc<InMemoryEventBus<ProductCreatedIntegrationEvent>>;

    /// Bus whose broker is always down; counts attempts.
    #[derive(Default)]
    struct BrokenBus {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl EventBus<ProductCreatedIntegrationEvent> for BrokenBus {
        type Error = String;

        async fn publish(&self, _message: ProductCreatedIntegrationEvent) -> Result<(), String> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err("connection refused".to_string())
        }
    }

    fn widget() -> CreateProductCommand {
        CreateProductCommand {
            name: "Widget".to_string(),
            price: 9.99,
            inventory: 50,
            category: "Hardware".to_string(),
        }
    }

    fn setup() -> (ProductMediator, Arc<InMemoryProductRepository>, IntegrationBus) {
        let repo = Arc::new(InMemoryProductRepository::new());
        let bus: IntegrationBus = Arc::new(InMemoryEventBus::new());
        let mediator =
            product_mediator(Arc::clone(&repo), Arc::clone(&bus), DeliveryPolicy::BestEffort).unwrap();
        (mediator, repo, bus)
    }

    async fn create(mediator: &ProductMediator, cmd: CreateProductCommand) -> ProductId {
        mediator
            .handle(cmd.into())
            .await
            .unwrap()
            .into_created()
            .expect("create replies with an id")
    }

    #[tokio::test]
    async fn create_then_get_round_trips_through_the_mediator() {
        let (mediator, repo, bus) = setup();
        let sub = bus.subscribe();

        let id = create(&mediator, widget()).await;

        let product = mediator
            .handle(GetProductsQuery { id: id.clone() }.into())
            .await
            .unwrap()
            .into_found()
            .expect("get replies with the product");

        assert_eq!(product.id(), &id);
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.price(), 9.99);
        assert_eq!(product.inventory(), 50);
        assert_eq!(product.category(), "Hardware");
        assert_eq!(repo.len(), 1);

        let published = sub.drain();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].queue_name(), "ProductCreated");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&published[0].to_json().unwrap()).unwrap(),
            serde_json::json!({ "id": id.as_str(), "name": "Widget", "price": 9.99 })
        );
    }

    #[tokio::test]
    async fn identical_creates_get_distinct_ids_and_one_event_each() {
        let (mediator, repo, bus) = setup();
        let sub = bus.subscribe();

        let first = create(&mediator, widget()).await;
        let second = create(&mediator, widget()).await;

        assert_ne!(first, second);
        assert_eq!(repo.len(), 2);

        let ids: Vec<ProductId> = sub.drain().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn get_of_unknown_id_is_not_found() {
        let (mediator, _repo, bus) = setup();
        let sub = bus.subscribe();
        let id: ProductId = "nonexistent-id".parse().unwrap();

        let err = mediator
            .handle(GetProductsQuery { id: id.clone() }.into())
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Handler(HandlerError::NotFound(ref missing)) if *missing == id));
        assert!(sub.drain().is_empty());
    }

    #[tokio::test]
    async fn invalid_create_stores_and_publishes_nothing() {
        let (mediator, repo, bus) = setup();
        let sub = bus.subscribe();

        let err = mediator
            .handle(
                CreateProductCommand {
                    name: "   ".to_string(),
                    ..widget()
                }
                .into(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Handler(HandlerError::Domain(_))));
        assert!(repo.is_empty());
        assert!(sub.drain().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_are_unsupported_and_leave_storage_untouched() {
        let (mediator, repo, _bus) = setup();
        let id = create(&mediator, widget()).await;
        let before = repo.read(&id).await.unwrap();

        assert_eq!(
            repo.update(&id, &before).await,
            Err(RepositoryError::Unsupported("update"))
        );
        assert_eq!(repo.delete(&id).await, Err(RepositoryError::Unsupported("delete")));
        assert_eq!(repo.read(&id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn best_effort_keeps_the_product_when_the_bus_is_down() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let bus = Arc::new(BrokenBus::default());
        let mediator =
            product_mediator(Arc::clone(&repo), Arc::clone(&bus), DeliveryPolicy::BestEffort).unwrap();

        let id = create(&mediator, widget()).await;

        assert_eq!(bus.attempts.load(Ordering::SeqCst), 1);
        assert!(repo.read(&id).await.is_ok());
    }

    #[tokio::test]
    async fn strict_delivery_fails_the_command_but_keeps_the_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let bus = Arc::new(BrokenBus::default());
        let mediator =
            product_mediator(Arc::clone(&repo), Arc::clone(&bus), DeliveryPolicy::Strict).unwrap();

        let err = mediator.handle(widget().into()).await.unwrap_err();

        match err {
            DispatchError::EventDelivery { kind, error } => {
                assert_eq!(kind, ProductMessageKind::ProductCreated);
                assert!(matches!(error, HandlerError::Publish(_)));
            }
            other => panic!("Expected EventDelivery, got {other:?}"),
        }
        assert_eq!(bus.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn sending_product_created_directly_publishes_it() {
        let (mediator, _repo, bus) = setup();
        let sub = bus.subscribe();
        let product =
            catalog_products::Product::new(ProductId::generate(), "Gizmo", 3.0, 1, "Misc").unwrap();
        let event = catalog_products::ProductCreated::from_product(&product, chrono::Utc::now());

        mediator.send(ProductMessage::from(event)).await.unwrap();

        assert_eq!(sub.drain().len(), 1);
    }

    #[tokio::test]
    async fn sqlite_backed_pipeline_persists_products() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let repo = Arc::new(SqliteProductRepository::from_pool(pool).await.unwrap());
        let bus: IntegrationBus = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe();
        let mediator = product_mediator(repo, Arc::clone(&bus), DeliveryPolicy::Strict).unwrap();

        let id = create(&mediator, widget()).await;
        let product = mediator
            .handle(GetProductsQuery { id: id.clone() }.into())
            .await
            .unwrap()
            .into_found()
            .unwrap();

        assert_eq!(product.name(), "Widget");
        assert_eq!(product.inventory(), 50);
        assert_eq!(sub.drain().len(), 1);
    }
}
