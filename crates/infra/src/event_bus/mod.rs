//! Infrastructure event bus implementations.
//!
//! The event bus abstraction lives in `catalog-events` as pure mechanics.
//! This module provides broker-backed implementations (e.g. Redis) and the
//! startup-time selection between them.

pub mod configured;
#[cfg(feature = "redis")]
pub mod redis_queue;

pub use configured::{ConfiguredBusError, ConfiguredEventBus};
#[cfg(feature = "redis")]
pub use redis_queue::{RedisBusError, RedisQueueEventBus};
