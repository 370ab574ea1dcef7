use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{Entity, ProductId};
use catalog_events::DomainEvent;

use crate::product::Product;

/// Event: ProductCreated.
///
/// Produced after a product has been persisted; consumed once, in-process, by
/// the event handler that forwards it to the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub occurred_at: DateTime<Utc>,
}

impl ProductCreated {
    pub fn from_product(product: &Product, occurred_at: DateTime<Utc>) -> Self {
        Self {
            product_id: product.id().clone(),
            name: product.name().to_string(),
            price: product.price(),
            occurred_at,
        }
    }
}

impl DomainEvent for ProductCreated {
    fn event_type(&self) -> &'static str {
        "products.product.created"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
