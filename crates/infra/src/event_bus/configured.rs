//! Event bus selected at startup from [`EventBusConfig`].

use async_trait::async_trait;
use thiserror::Error;

use catalog_events::{EventBus, InMemoryBusError, InMemoryEventBus, IntegrationEvent};

use crate::config::EventBusConfig;

#[cfg(feature = "redis")]
use super::redis_queue::{RedisBusError, RedisQueueEventBus};

#[derive(Debug, Error)]
pub enum ConfiguredBusError {
    #[error(transparent)]
    Memory(#[from] InMemoryBusError),

    #[cfg(feature = "redis")]
    #[error(transparent)]
    Redis(#[from] RedisBusError),

    /// The configured transport was left out of this build.
    #[error("event bus `{0}` is not available in this build")]
    NotCompiled(&'static str),
}

pub enum ConfiguredEventBus<M> {
    Memory(InMemoryEventBus<M>),
    #[cfg(feature = "redis")]
    Redis(RedisQueueEventBus<M>),
}

impl<M: IntegrationEvent> ConfiguredEventBus<M> {
    pub fn from_config(config: &EventBusConfig) -> Result<Self, ConfiguredBusError> {
        match config {
            EventBusConfig::Memory => {
                tracing::warn!("using in-memory event bus; integration events stay in-process");
                Ok(Self::Memory(InMemoryEventBus::new()))
            }
            #[cfg(feature = "redis")]
            EventBusConfig::Redis { url } => {
                tracing::info!(%url, "using redis event bus");
                Ok(Self::Redis(RedisQueueEventBus::new(url)?))
            }
            #[cfg(not(feature = "redis"))]
            EventBusConfig::Redis { .. } => Err(ConfiguredBusError::NotCompiled("redis")),
        }
    }
}

#[async_trait]
impl<M: IntegrationEvent> EventBus<M> for ConfiguredEventBus<M> {
    type Error = ConfiguredBusError;

    async fn publish(&self, message: M) -> Result<(), Self::Error> {
        match self {
            Self::Memory(bus) => bus.publish(message).await.map_err(Into::into),
            #[cfg(feature = "redis")]
            Self::Redis(bus) => bus.publish(message).await.map_err(Into::into),
        }
    }
}
