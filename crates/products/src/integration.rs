//! Translation of product domain events into integration events.

use serde::{Deserialize, Serialize};

use catalog_core::ProductId;
use catalog_events::IntegrationEvent;

use crate::event::ProductCreated;

/// Integration event published when a product is created.
///
/// Wire format: `{"id": "...", "name": "...", "price": 9.99}` on the
/// `ProductCreated` queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreatedIntegrationEvent {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
}

impl ProductCreatedIntegrationEvent {
    pub const QUEUE: &'static str = "ProductCreated";
}

impl From<&ProductCreated> for ProductCreatedIntegrationEvent {
    fn from(event: &ProductCreated) -> Self {
        Self {
            id: event.product_id.clone(),
            name: event.name.clone(),
            price: event.price,
        }
    }
}

impl IntegrationEvent for ProductCreatedIntegrationEvent {
    fn queue_name(&self) -> &'static str {
        Self::QUEUE
    }
}
