//! `catalog-auth`: bearer token validation boundary.
//!
//! This crate is intentionally decoupled from HTTP: it models the outcome of a
//! token check and the contract a validator fulfils. The remote (RFC 7662)
//! introspection client lives in `catalog-infra`.

pub mod introspection;
pub mod principal;
pub mod validator;

pub use introspection::{IntrospectionResponse, validate_introspection};
pub use principal::Principal;
pub use validator::{StaticTokenValidator, TokenValidationError, TokenValidator};
