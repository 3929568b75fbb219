use crate::request::{HttpRequest, Payload};
use crate::transport::HttpClient;
use crate::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// TTL applied when a call does not specify one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Counters for cache behavior. Observability only; never drives policy.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Default)]
struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
}

impl AtomicStats {
    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
        }
    }
}

/// Cache-first read-through over the transport.
///
/// This is a plain read-through, not single-flight: concurrent callers
/// racing on the same cold key may each invoke the transport and each
/// write the same value.
pub struct Gateway {
    transport: HttpClient,
    cache: Arc<dyn crate::cache::ResultCache>,
    default_ttl: Duration,
    stats: AtomicStats,
}

impl Gateway {
    pub fn new(transport: HttpClient, cache: Arc<dyn crate::cache::ResultCache>) -> Self {
        Self::with_default_ttl(transport, cache, DEFAULT_TTL)
    }

    pub fn with_default_ttl(
        transport: HttpClient,
        cache: Arc<dyn crate::cache::ResultCache>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            transport,
            cache,
            default_ttl,
            stats: AtomicStats::default(),
        }
    }

    /// Return the cached value for `key` when present and non-empty;
    /// otherwise perform the network call and cache a non-empty success.
    ///
    /// Empty successful results are deliberately never cached and a cached
    /// empty value reads as a miss, so calls that legitimately return
    /// nothing re-fetch every time. Errors are propagated, never stored.
    pub async fn fetch(
        &self,
        key: &str,
        request: &HttpRequest,
        ttl: Option<Duration>,
    ) -> Result<Payload> {
        if let Some(cached) = self.cache.get(key).await {
            if !cached.is_empty() {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key, "cache hit");
                return Ok(cached);
            }
        }
        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key, "cache miss");

        let value = self.transport.send(request).await?;
        if !value.is_empty() {
            self.cache
                .set(key, value.clone(), ttl.unwrap_or(self.default_ttl))
                .await;
            self.stats.sets.fetch_add(1, Ordering::Relaxed);
        }
        Ok(value)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
