use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::principal::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token is not active")]
    Inactive,

    #[error("token has expired")]
    Expired,

    #[error("token validation unavailable: {0}")]
    Unavailable(String),

    #[error("malformed validation response: {0}")]
    Malformed(String),
}

/// Decides whether a bearer token is valid.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<Principal, TokenValidationError>;
}

#[async_trait]
impl<V> TokenValidator for Arc<V>
where
    V: TokenValidator + ?Sized,
{
    async fn validate(&self, token: &str) -> Result<Principal, TokenValidationError> {
        (**self).validate(token).await
    }
}

/// Fixed token table (tests/dev).
#[derive(Debug, Clone, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(token.into(), principal);
        self
    }
}

#[async_trait]
impl TokenValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Result<Principal, TokenValidationError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(TokenValidationError::Inactive)
    }
}
