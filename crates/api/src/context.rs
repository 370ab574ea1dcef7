use catalog_auth::Principal;

/// Authenticated caller of a request.
///
/// Only present when bearer authentication is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    /// Subject if the issuer reported one, otherwise the client id.
    pub fn caller(&self) -> Option<&str> {
        self.principal
            .subject
            .as_deref()
            .or(self.principal.client_id.as_deref())
    }
}
