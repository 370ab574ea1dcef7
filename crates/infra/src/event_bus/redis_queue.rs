//! Redis list-backed event bus (optional).
//!
//! Each integration event is `RPUSH`ed as JSON onto a Redis list named after
//! the event's queue (e.g. `ProductCreated`), so consumers can `BLPOP` it as a
//! work queue. Publishing is fire-and-forget: no acknowledgment, no retry, and
//! a connection is opened per publish.

use std::marker::PhantomData;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tracing::instrument;

use catalog_events::{EventBus, IntegrationEvent};

#[derive(Debug, Error)]
pub enum RedisBusError {
    #[error("redis error: {0}")]
    Redis(String),

    #[error("event serialization failed: {0}")]
    Serialize(String),
}

/// Redis queue bus for JSON integration events.
#[derive(Debug)]
pub struct RedisQueueEventBus<M> {
    client: redis::Client,
    key_prefix: String,
    _message: PhantomData<fn(M)>,
}

impl<M> Clone for RedisQueueEventBus<M> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            key_prefix: self.key_prefix.clone(),
            _message: PhantomData,
        }
    }
}

impl<M> RedisQueueEventBus<M> {
    pub fn new(redis_url: impl AsRef<str>) -> Result<Self, RedisBusError> {
        let client = redis::Client::open(redis_url.as_ref())
            .map_err(|e| RedisBusError::Redis(e.to_string()))?;
        Ok(Self {
            client,
            key_prefix: String::new(),
            _message: PhantomData,
        })
    }

    /// Namespace every queue key (e.g. `catalog:` → `catalog:ProductCreated`).
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn queue_key(&self, queue_name: &str) -> String {
        format!("{}{}", self.key_prefix, queue_name)
    }
}

#[async_trait]
impl<M> EventBus<M> for RedisQueueEventBus<M>
where
    M: IntegrationEvent,
{
    type Error = RedisBusError;

    #[instrument(skip(self, message), fields(queue = message.queue_name()), err)]
    async fn publish(&self, message: M) -> Result<(), Self::Error> {
        let payload = message
            .to_json()
            .map_err(|e| RedisBusError::Serialize(e.to_string()))?;
        let key = self.queue_key(message.queue_name());

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| RedisBusError::Redis(e.to_string()))?;

        let depth: i64 = conn
            .rpush(&key, payload)
            .await
            .map_err(|e| RedisBusError::Redis(e.to_string()))?;

        tracing::debug!(%key, depth, "published integration event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use catalog_products::ProductCreatedIntegrationEvent;

    use super::*;

    #[test]
    fn queue_keys_are_named_after_the_event_type() {
        let bus = RedisQueueEventBus::<ProductCreatedIntegrationEvent>::new("redis://127.0.0.1/").unwrap();
        assert_eq!(bus.queue_key(ProductCreatedIntegrationEvent::QUEUE), "ProductCreated");

        let prefixed = bus.with_key_prefix("catalog:");
        assert_eq!(prefixed.queue_key("ProductCreated"), "catalog:ProductCreated");
    }

    #[test]
    fn invalid_url_is_rejected_up_front() {
        let err = RedisQueueEventBus::<ProductCreatedIntegrationEvent>::new("not a url").unwrap_err();
        assert!(matches!(err, RedisBusError::Redis(_)));
    }

    #[tokio::test]
    async fn publish_to_unreachable_broker_surfaces_a_redis_error() {
        // Port 1 is reserved; nothing listens there.
        let bus = RedisQueueEventBus::<ProductCreatedIntegrationEvent>::new("redis://127.0.0.1:1/").unwrap();
        let event = ProductCreatedIntegrationEvent {
            id: "p-1".parse().unwrap(),
            name: "Widget".to_string(),
            price: 9.99,
        };

        let err = bus.publish(event).await.unwrap_err();
        assert!(matches!(err, RedisBusError::Redis(_)));
    }
}
