//! Caching wrappers around collaborators.

use crate::cache::{ResponseCache, TtlCache};
use async_trait::async_trait;
use screener_core::error::DataError;
use screener_core::traits::{BarSource, UniverseSource};
use screener_core::types::{Bar, Lookback};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// [`BarSource`] that serves repeated requests from a cache.
///
/// Only successful responses are cached, so a transient provider failure is
/// retried on the next request.
pub struct CachedBarSource<S> {
    inner: S,
    cache: Arc<dyn ResponseCache<Vec<Bar>>>,
    name: String,
}

impl<S: BarSource> CachedBarSource<S> {
    /// Wrap `inner` with a [`TtlCache`] of the given TTL.
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self::with_cache(inner, Arc::new(TtlCache::new(ttl)))
    }

    /// Wrap `inner` with a caller-supplied cache.
    pub fn with_cache(inner: S, cache: Arc<dyn ResponseCache<Vec<Bar>>>) -> Self {
        let name = format!("cached({})", inner.name());
        Self { inner, cache, name }
    }

    /// Cache key of a bar request.
    pub fn cache_key(ticker: &str, lookback: Lookback) -> String {
        format!("bars:{}:{}", ticker, lookback)
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<dyn ResponseCache<Vec<Bar>>> {
        &self.cache
    }
}

#[async_trait]
impl<S: BarSource> BarSource for CachedBarSource<S> {
    async fn daily_bars(&self, ticker: &str, lookback: Lookback) -> Result<Vec<Bar>, DataError> {
        let key = Self::cache_key(ticker, lookback);
        if let Some(bars) = self.cache.get(&key).await {
            trace!(ticker, %lookback, "bar cache hit");
            return Ok(bars);
        }

        let bars = self.inner.daily_bars(ticker, lookback).await?;
        self.cache.put(key, bars.clone()).await;
        Ok(bars)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// [`UniverseSource`] that serves the listing from a cache.
pub struct CachedUniverse<S> {
    inner: S,
    cache: Arc<dyn ResponseCache<Vec<String>>>,
    name: String,
}

impl<S: UniverseSource> CachedUniverse<S> {
    const KEY: &'static str = "universe";

    /// Wrap `inner` with a [`TtlCache`] of the given TTL.
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self::with_cache(inner, Arc::new(TtlCache::new(ttl)))
    }

    /// Wrap `inner` with a caller-supplied cache.
    pub fn with_cache(inner: S, cache: Arc<dyn ResponseCache<Vec<String>>>) -> Self {
        let name = format!("cached({})", inner.name());
        Self { inner, cache, name }
    }

    /// Force the next listing to hit the wrapped source.
    pub async fn invalidate(&self) {
        self.cache.invalidate(Self::KEY).await;
    }
}

#[async_trait]
impl<S: UniverseSource> UniverseSource for CachedUniverse<S> {
    async fn list_universe(&self) -> Result<Vec<String>, DataError> {
        if let Some(symbols) = self.cache.get(Self::KEY).await {
            return Ok(symbols);
        }

        let symbols = self.inner.list_universe().await?;
        self.cache.put(Self::KEY.to_string(), symbols.clone()).await;
        Ok(symbols)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBars {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl BarSource for CountingBars {
        async fn daily_bars(&self, _ticker: &str, _lookback: Lookback) -> Result<Vec<Bar>, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DataError::ConnectionError("down".into()));
            }
            Ok(vec![Bar::new(1, 1.0, 1.0, 1.0, 1.25, 100.0)])
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct CountingUniverse(AtomicUsize);

    #[async_trait]
    impl UniverseSource for CountingUniverse {
        async fn list_universe(&self) -> Result<Vec<String>, DataError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["AAA".to_string(), "BBB".to_string()])
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_repeated_requests_hit_cache() {
        let source = CachedBarSource::new(CountingBars::default(), Duration::from_secs(60));

        source.daily_bars("ABCD", Lookback::SixMonths).await.unwrap();
        source.daily_bars("ABCD", Lookback::SixMonths).await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);

        // Different lookback is a different request
        source.daily_bars("ABCD", Lookback::FiveDays).await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_latest_close_goes_through_cache() {
        let source = CachedBarSource::new(CountingBars::default(), Duration::from_secs(60));

        assert_eq!(source.latest_close("ABCD").await.unwrap(), Some(1.25));
        assert_eq!(source.latest_close("ABCD").await.unwrap(), Some(1.25));
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_injected_cache_controls_invalidation() {
        let cache: Arc<TtlCache<Vec<Bar>>> = Arc::new(TtlCache::new(Duration::from_secs(60)));
        let source = CachedBarSource::with_cache(CountingBars::default(), cache.clone());

        source.daily_bars("ABCD", Lookback::SixMonths).await.unwrap();
        let key = CachedBarSource::<CountingBars>::cache_key("ABCD", Lookback::SixMonths);
        assert!(cache.invalidate(&key).await);

        source.daily_bars("ABCD", Lookback::SixMonths).await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source = CachedBarSource::new(
            CountingBars {
                fail: true,
                ..Default::default()
            },
            Duration::from_secs(60),
        );

        assert!(source.daily_bars("ABCD", Lookback::SixMonths).await.is_err());
        assert!(source.daily_bars("ABCD", Lookback::SixMonths).await.is_err());
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_universe_cached_until_invalidated() {
        let source = CachedUniverse::new(CountingUniverse(AtomicUsize::new(0)), Duration::from_secs(60));

        assert_eq!(source.list_universe().await.unwrap().len(), 2);
        source.list_universe().await.unwrap();
        assert_eq!(source.inner.0.load(Ordering::SeqCst), 1);

        source.invalidate().await;
        source.list_universe().await.unwrap();
        assert_eq!(source.inner.0.load(Ordering::SeqCst), 2);
        assert_eq!(source.name(), "cached(counting)");
    }
}
