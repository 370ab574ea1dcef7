//! Messages understood by the products bounded context.

use serde::{Deserialize, Serialize};

use catalog_core::ProductId;
use catalog_events::Message;

use crate::event::ProductCreated;
use crate::product::Product;

/// Command: create a product. The identifier is generated by the handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductCommand {
    pub name: String,
    pub price: f64,
    pub inventory: i64,
    pub category: String,
}

/// Query: fetch a single product by identifier (a point lookup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProductsQuery {
    pub id: ProductId,
}

/// Dispatch key for [`ProductMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductMessageKind {
    CreateProduct,
    GetProducts,
    ProductCreated,
}

impl ProductMessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductMessageKind::CreateProduct => "CreateProductCommand",
            ProductMessageKind::GetProducts => "GetProductsQuery",
            ProductMessageKind::ProductCreated => "ProductCreated",
        }
    }
}

impl core::fmt::Display for ProductMessageKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every command, query and domain event of the products context.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductMessage {
    CreateProduct(CreateProductCommand),
    GetProducts(GetProductsQuery),
    ProductCreated(ProductCreated),
}

impl Message for ProductMessage {
    type Kind = ProductMessageKind;

    fn kind(&self) -> Self::Kind {
        match self {
            ProductMessage::CreateProduct(_) => ProductMessageKind::CreateProduct,
            ProductMessage::GetProducts(_) => ProductMessageKind::GetProducts,
            ProductMessage::ProductCreated(_) => ProductMessageKind::ProductCreated,
        }
    }
}

impl From<CreateProductCommand> for ProductMessage {
    fn from(value: CreateProductCommand) -> Self {
        ProductMessage::CreateProduct(value)
    }
}

impl From<GetProductsQuery> for ProductMessage {
    fn from(value: GetProductsQuery) -> Self {
        ProductMessage::GetProducts(value)
    }
}

impl From<ProductCreated> for ProductMessage {
    fn from(value: ProductCreated) -> Self {
        ProductMessage::ProductCreated(value)
    }
}

/// Replies produced by product handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductReply {
    /// A product was created with this identifier.
    Created(ProductId),
    /// A product was found.
    Found(Product),
    /// An event was accepted (no payload).
    Accepted,
}

impl ProductReply {
    pub fn into_created(self) -> Option<ProductId> {
        match self {
            ProductReply::Created(id) => Some(id),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<Product> {
        match self {
            ProductReply::Found(product) => Some(product),
            _ => None,
        }
    }
}
