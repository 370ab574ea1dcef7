//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: infrastructure wiring (repository, bus, mediator)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use catalog_auth::TokenValidator;
use catalog_infra::config::AppConfig;
use catalog_infra::external::HttpTokenIntrospector;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::{AppServices, StartupError};

/// Build the full HTTP router from configuration (used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> Result<Router, StartupError> {
    let services = AppServices::from_config(config).await?;

    let validator: Option<Arc<dyn TokenValidator>> = match &config.introspection {
        Some(introspection) => {
            tracing::info!(url = %introspection.url, "bearer authentication enabled");
            Some(Arc::new(HttpTokenIntrospector::new(introspection)?))
        }
        None => {
            tracing::warn!("no introspection endpoint configured; product routes are unauthenticated");
            None
        }
    };

    Ok(build_app_with(services, validator))
}

/// Build the router around already-wired services.
pub fn build_app_with(services: AppServices, validator: Option<Arc<dyn TokenValidator>>) -> Router {
    let mut protected = routes::router().layer(Extension(Arc::new(services)));

    if let Some(validator) = validator {
        protected = protected.layer(axum::middleware::from_fn_with_state(
            middleware::AuthState { validator },
            middleware::auth_middleware,
        ));
    }

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
