//! Caching layer for TfL line listings.
//!
//! The whole listing is cached as a single entry under a fixed key. Its
//! lifetime comes from the upstream `Cache-Control: max-age`; responses
//! without one are never cached.
//!
//! The key does not include the configured modes, so providers with
//! different modes sharing one store will serve each other's listing.

use std::future::{self, Future};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use moka::Expiry;
use moka::future::Cache as MokaCache;

use crate::tfl::{LineSet, LineSource, TflClient, TflError};

/// Cache key for the line listing.
pub const AVAILABLE_LINES_KEY: &str = "TfL.AvailableLines";

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_capacity: 16 }
    }
}

/// A cached listing together with its freshness lifetime.
#[derive(Debug, Clone)]
pub struct CachedLines {
    pub lines: LineSet,

    /// How long the entry lives from the moment it was written.
    pub ttl: Duration,

    /// Wall-clock instant at which the entry expires (for reporting).
    pub expires_at: DateTime<Utc>,
}

/// Per-entry expiry taken from the stored value.
///
/// An overwrite restarts the clock with the new value's lifetime, so the
/// last writer's max-age wins.
struct MaxAgeExpiry;

impl Expiry<String, CachedLines> for MaxAgeExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedLines,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedLines,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory store for line listings.
///
/// Cloning yields another handle to the same store, so one cache can be
/// shared process-wide and outlive any provider using it.
#[derive(Clone)]
pub struct LineCache {
    entries: MokaCache<String, CachedLines>,
}

impl LineCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(MaxAgeExpiry)
            .build();

        Self { entries }
    }

    /// Get a live entry, or `None` if absent or expired.
    pub async fn get(&self, key: &str) -> Option<CachedLines> {
        self.entries.get(key).await
    }

    /// Store `lines` under `key` for `ttl`, replacing any existing entry.
    pub async fn insert(&self, key: &str, lines: LineSet, ttl: Duration) -> CachedLines {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let entry = CachedLines {
            lines,
            ttl,
            expires_at,
        };
        self.entries.insert(key.to_string(), entry.clone()).await;
        entry
    }
}

impl Default for LineCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

/// Line provider with caching.
///
/// Owns the line source (for [`TflClient`], the HTTP client) until
/// [`close`](Self::close) is called or the provider is dropped. The cache is
/// only borrowed: the provider reads and writes [`AVAILABLE_LINES_KEY`] and
/// nothing else.
///
/// Concurrent misses are not coalesced: each performs its own fetch and the
/// last write determines the entry's expiry.
pub struct CachedLineProvider<S = TflClient> {
    source: RwLock<Option<S>>,
    cache: LineCache,
}

impl<S: LineSource> CachedLineProvider<S> {
    /// Create a new cached provider.
    pub fn new(source: S, cache: LineCache) -> Self {
        Self {
            source: RwLock::new(Some(source)),
            cache,
        }
    }

    /// Get the current lines, using the cache if available.
    pub async fn get_lines(&self) -> Result<LineSet, TflError> {
        self.get_lines_until(future::pending()).await
    }

    /// Get the current lines, abandoning the fetch if `cancel` completes first.
    ///
    /// Cancellation only applies to the network fetch: a cache hit is served
    /// regardless, and a cancelled fetch leaves the cache untouched.
    pub async fn get_lines_until<F>(&self, cancel: F) -> Result<LineSet, TflError>
    where
        F: Future<Output = ()>,
    {
        if let Some(cached) = self.cache.get(AVAILABLE_LINES_KEY).await {
            tracing::debug!(expires_at = %cached.expires_at, "serving TfL lines from cache");
            return Ok(cached.lines);
        }

        let source = self.source()?;
        tracing::debug!("TfL lines not cached, fetching");

        let fetched = tokio::select! {
            biased;
            () = cancel => {
                tracing::debug!("TfL line fetch cancelled");
                return Err(TflError::Cancelled);
            }
            result = source.fetch_lines() => result?,
        };

        match fetched.max_age {
            Some(ttl) if !ttl.is_zero() => {
                let entry = self
                    .cache
                    .insert(AVAILABLE_LINES_KEY, fetched.lines.clone(), ttl)
                    .await;
                tracing::debug!(
                    count = entry.lines.len(),
                    expires_at = %entry.expires_at,
                    "cached TfL lines"
                );
            }
            _ => tracing::debug!("TfL response had no usable max-age, not caching"),
        }

        Ok(fetched.lines)
    }

    /// Release the owned line source.
    ///
    /// Only the first call has an effect. Afterwards cache hits are still
    /// served but misses fail with [`TflError::Closed`].
    pub fn close(&self) {
        let released = self
            .source
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if released.is_some() {
            tracing::info!("TfL line provider closed");
        }
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.source
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// The cache this provider reads and writes.
    pub fn cache(&self) -> &LineCache {
        &self.cache
    }

    /// Clone the source out so no lock is held across the fetch.
    fn source(&self) -> Result<S, TflError> {
        self.source
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(TflError::Closed)
    }
}
