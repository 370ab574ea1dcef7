//! RFC 7662 token introspection over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use catalog_auth::{
    IntrospectionResponse, Principal, TokenValidationError, TokenValidator, validate_introspection,
};

use crate::config::IntrospectionConfig;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Validates bearer tokens by POSTing them to an introspection endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenIntrospector {
    client: reqwest::Client,
    url: String,
    credentials: Option<(String, String)>,
}

impl HttpTokenIntrospector {
    pub fn new(config: &IntrospectionConfig) -> Result<Self, TokenValidationError> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| TokenValidationError::Unavailable(e.to_string()))?;

        let credentials = match (&config.client_id, &config.client_secret) {
            (Some(id), Some(secret)) => Some((id.clone(), secret.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            url: config.url.clone(),
            credentials,
        })
    }

    async fn introspect(&self, token: &str) -> Result<IntrospectionResponse, TokenValidationError> {
        let mut request = self
            .client
            .post(&self.url)
            .form(&[("token", token), ("token_type_hint", "access_token")]);
        if let Some((id, secret)) = &self.credentials {
            request = request.basic_auth(id, Some(secret));
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "introspection request failed");
            TokenValidationError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "introspection endpoint returned an error");
            return Err(TokenValidationError::Unavailable(format!(
                "introspection endpoint returned {status}"
            )));
        }

        response
            .json::<IntrospectionResponse>()
            .await
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl TokenValidator for HttpTokenIntrospector {
    #[tracing::instrument(skip_all)]
    async fn validate(&self, token: &str) -> Result<Principal, TokenValidationError> {
        let response = self.introspect(token).await?;
        let principal = validate_introspection(&response, Utc::now())?;
        tracing::debug!(subject = ?principal.subject, "token accepted");
        Ok(principal)
    }
}
