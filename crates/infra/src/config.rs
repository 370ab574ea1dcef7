//! Process configuration loaded from `CATALOG_*` environment variables.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

use catalog_observability::LogFormat;

use crate::mediator::DeliveryPolicy;

pub const BIND_ADDR: &str = "CATALOG_BIND_ADDR";
pub const DATABASE_URL: &str = "CATALOG_DATABASE_URL";
pub const EVENT_BUS: &str = "CATALOG_EVENT_BUS";
pub const REDIS_URL: &str = "CATALOG_REDIS_URL";
pub const EVENT_DELIVERY: &str = "CATALOG_EVENT_DELIVERY";
pub const INTROSPECTION_URL: &str = "CATALOG_INTROSPECTION_URL";
pub const INTROSPECTION_CLIENT_ID: &str = "CATALOG_INTROSPECTION_CLIENT_ID";
pub const INTROSPECTION_CLIENT_SECRET: &str = "CATALOG_INTROSPECTION_CLIENT_SECRET";
pub const LOG_FORMAT: &str = "CATALOG_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_URL: &str = "sqlite://products.db";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable '{0}' is required but not set")]
    Missing(&'static str),

    #[error("failed to parse environment variable '{key}': {details}")]
    Invalid { key: &'static str, details: String },
}

impl ConfigError {
    fn invalid(key: &'static str, details: impl ToString) -> Self {
        ConfigError::Invalid {
            key,
            details: details.to_string(),
        }
    }
}

/// Where products are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryBackend {
    InMemory,
    Sqlite { url: String },
}

/// Where integration events go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBusConfig {
    /// In-process fan-out; nothing leaves the process.
    Memory,
    /// One Redis list per queue name.
    Redis { url: String },
}

/// RFC 7662 token introspection endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectionConfig {
    pub url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub repository: RepositoryBackend,
    pub event_bus: EventBusConfig,
    pub delivery: DeliveryPolicy,
    /// `None` leaves the product routes open.
    pub introspection: Option<IntrospectionConfig>,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = get(BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid(BIND_ADDR, e))?;

        let database_url = get(DATABASE_URL).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let repository = if database_url.eq_ignore_ascii_case("memory") {
            RepositoryBackend::InMemory
        } else if database_url.starts_with("sqlite:") {
            RepositoryBackend::Sqlite { url: database_url }
        } else {
            return Err(ConfigError::invalid(
                DATABASE_URL,
                format!("`{database_url}` is neither `memory` nor a sqlite: url"),
            ));
        };

        let event_bus = match get(EVENT_BUS).as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("memory") => EventBusConfig::Memory,
            Some("redis") => EventBusConfig::Redis {
                url: get(REDIS_URL).unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            },
            Some(other) => {
                return Err(ConfigError::invalid(
                    EVENT_BUS,
                    format!("unknown event bus `{other}` (expected `memory` or `redis`)"),
                ));
            }
        };

        let delivery = match get(EVENT_DELIVERY) {
            Some(raw) => raw
                .parse::<DeliveryPolicy>()
                .map_err(|e| ConfigError::invalid(EVENT_DELIVERY, e))?,
            None => DeliveryPolicy::default(),
        };

        let introspection = match get(INTROSPECTION_URL) {
            Some(url) => {
                let client_id = get(INTROSPECTION_CLIENT_ID);
                let client_secret = get(INTROSPECTION_CLIENT_SECRET);
                if client_id.is_some() && client_secret.is_none() {
                    return Err(ConfigError::Missing(INTROSPECTION_CLIENT_SECRET));
                }
                Some(IntrospectionConfig {
                    url,
                    client_id,
                    client_secret,
                })
            }
            None => None,
        };

        let log_format = match get(LOG_FORMAT) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT, e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            repository,
            event_bus,
            delivery,
            introspection,
            log_format,
        })
    }
}
