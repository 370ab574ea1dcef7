use serde::{Deserialize, Serialize};

/// Identity attached to a request once its bearer token has been accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Token subject (`sub`), when the issuer provides one.
    pub subject: Option<String>,

    /// OAuth client the token was issued to.
    pub client_id: Option<String>,

    /// Granted scopes (space-separated `scope` claim, split).
    pub scopes: Vec<String>,
}

impl Principal {
    pub fn with_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}
