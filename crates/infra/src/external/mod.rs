//! Clients for services outside the process.

pub mod introspection;

pub use introspection::HttpTokenIntrospector;
