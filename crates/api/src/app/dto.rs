use serde::{Deserialize, Serialize};

use catalog_core::Entity;
use catalog_products::{CreateProductCommand, Product};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /products`.
///
/// `inventory` is accepted as any `i64` so a negative count reaches
/// `Product::new` and is reported as a validation error rather than a body
/// parse failure.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub inventory: i64,
    #[serde(default)]
    pub category: String,
}

impl From<CreateProductRequest> for CreateProductCommand {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            price: req.price,
            inventory: req.inventory,
            category: req.category,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

pub fn product_to_json(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id().as_str(),
        "name": product.name(),
        "price": product.price(),
        "inventory": product.inventory(),
        "category": product.category(),
    })
}
