//! OAuth 2.0 token introspection (RFC 7662) response model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::principal::Principal;
use crate::validator::TokenValidationError;

/// Introspection endpoint response.
///
/// Only `active` is mandatory; everything else is optional per RFC 7662.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    pub active: bool,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Deterministically turn an introspection response into a principal.
///
/// The issuer already decided `active`; `exp` is re-checked against `now` so a
/// cached or slow response cannot admit an expired token.
pub fn validate_introspection(
    response: &IntrospectionResponse,
    now: DateTime<Utc>,
) -> Result<Principal, TokenValidationError> {
    if !response.active {
        return Err(TokenValidationError::Inactive);
    }

    if let Some(exp) = response.exp {
        if exp <= now.timestamp() {
            return Err(TokenValidationError::Expired);
        }
    }

    Ok(Principal {
        subject: response.sub.clone(),
        client_id: response.client_id.clone(),
        scopes: response
            .scope
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn inactive_tokens_are_rejected() {
        let response = IntrospectionResponse {
            active: false,
            ..Default::default()
        };
        assert_eq!(
            validate_introspection(&response, Utc::now()),
            Err(TokenValidationError::Inactive)
        );
    }

    #[test]
    fn expired_tokens_are_rejected_even_if_active() {
        let now = Utc::now();
        let response = IntrospectionResponse {
            active: true,
            exp: Some((now - Duration::seconds(1)).timestamp()),
            ..Default::default()
        };
        assert_eq!(
            validate_introspection(&response, now),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn active_token_yields_principal_with_split_scopes() {
        let now = Utc::now();
        let response = IntrospectionResponse {
            active: true,
            sub: Some("user-1".to_string()),
            scope: Some("products.read  products.write".to_string()),
            client_id: Some("web".to_string()),
            exp: Some((now + Duration::minutes(5)).timestamp()),
        };

        let principal = validate_introspection(&response, now).unwrap();
        assert_eq!(principal.subject.as_deref(), Some("user-1"));
        assert_eq!(principal.client_id.as_deref(), Some("web"));
        assert!(principal.has_scope("products.write"));
        assert_eq!(principal.scopes.len(), 2);
    }

    #[test]
    fn minimal_response_deserializes() {
        let response: IntrospectionResponse = serde_json::from_str(r#"{"active":true}"#).unwrap();
        assert!(response.active);
        assert!(validate_introspection(&response, Utc::now()).is_ok());
    }
}
