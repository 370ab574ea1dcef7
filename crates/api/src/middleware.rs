use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use catalog_auth::{TokenValidationError, TokenValidator};

use crate::app::errors::json_error;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn TokenValidator>,
}

/// Require a valid bearer token; attaches a [`PrincipalContext`] on success.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = match extract_bearer(req.headers()) {
        Some(token) => token.to_string(),
        None => return json_error(StatusCode::UNAUTHORIZED, "unauthorized", "missing bearer token"),
    };

    let principal = match state.validator.validate(&token).await {
        Ok(principal) => principal,
        Err(TokenValidationError::Unavailable(msg)) => {
            tracing::error!(error = %msg, "token validation unavailable");
            return json_error(StatusCode::SERVICE_UNAVAILABLE, "auth_unavailable", msg);
        }
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            return json_error(StatusCode::UNAUTHORIZED, "unauthorized", e.to_string());
        }
    };

    req.extensions_mut().insert(PrincipalContext::new(principal));
    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();

    if token.is_empty() { None } else { Some(token) }
}
