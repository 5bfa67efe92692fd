//! Caching abstractions

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// An async key-value cache with optional per-entry expiry.
#[async_trait]
pub trait Cache<K, V>: Send + Sync
where
    K: Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K) -> Option<V>;

    /// Stores `value`. `None` keeps the entry for the lifetime of the cache.
    async fn put(&self, key: K, value: V, ttl: Option<Duration>);
}

/// Source of the current instant for cache expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
