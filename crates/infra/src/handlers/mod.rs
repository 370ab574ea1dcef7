//! Message handlers wired into the mediator.

pub mod products;

pub use products::{
    CreateProductCommandHandler, GetProductsQueryHandler, HandlerError, ProductCreatedEventHandler,
    ProductMediator, product_mediator,
};
