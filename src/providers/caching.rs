use crate::core::cache::Cache;
use crate::core::rates::{RateProvider, RateQuery, RateRecord};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Memoizes successful fetches per `(base, target, start, end)`.
///
/// Empty results are cached like any other. Errors are not, so a later call
/// can recover from a transient outage.
pub struct CachingRateProvider<T: RateProvider> {
    inner: T,
    cache: Arc<dyn Cache<RateQuery, Vec<RateRecord>>>,
    ttl: Option<Duration>,
}

impl<T: RateProvider> CachingRateProvider<T> {
    pub fn new(
        inner: T,
        cache: Arc<dyn Cache<RateQuery, Vec<RateRecord>>>,
        ttl: Option<Duration>,
    ) -> Self {
        Self { inner, cache, ttl }
    }
}

#[async_trait]
impl<T: RateProvider> RateProvider for CachingRateProvider<T> {
    async fn fetch_rates(&self, query: &RateQuery) -> Result<Vec<RateRecord>> {
        if let Some(cached) = self.cache.get(query).await {
            debug!("Cache hit for rates: {}", query);
            return Ok(cached);
        }
        debug!("Cache miss for rates: {}", query);

        let records = self.inner.fetch_rates(query).await?;
        self.cache
            .put(query.clone(), records.clone(), self.ttl)
            .await;
        Ok(records)
    }
}
