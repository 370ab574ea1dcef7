use axum::Router;

pub mod products;
pub mod system;

/// Router for every endpoint that sits behind authentication (when enabled).
pub fn router() -> Router {
    Router::new().nest("/products", products::router())
}
