//! Exchange-rate caching with a fixed freshness window.
//!
//! Each `(source, target)` key owns a slot guarded by an async mutex. The
//! check-then-fetch-then-store sequence for a key runs while holding that
//! mutex, so at most one lookup per key is ever in flight. Callers that queue
//! up behind a running lookup reuse its outcome instead of issuing their own.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use rates_types::{CacheStats, Clock, Currency, LookupError, RateKey, RateLookupPort, SystemClock};

/// Default freshness window: one hour.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(60 * 60);

/// Configuration for the rate cache.
#[derive(Debug, Clone)]
pub struct RateCacheConfig {
    /// Maximum age of a cached rate before it must be refreshed.
    pub freshness: Duration,
    /// Upper bound on a single lookup. `None` waits forever.
    pub lookup_timeout: Option<Duration>,
}

impl Default for RateCacheConfig {
    fn default() -> Self {
        Self {
            freshness: DEFAULT_FRESHNESS,
            lookup_timeout: None,
        }
    }
}

/// Copy of a stored rate handed out to callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedRate {
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
    /// Whether the entry was inside the freshness window when observed.
    pub fresh: bool,
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    rate: f64,
    fetched_at: DateTime<Utc>,
}

#[derive(Default)]
struct SlotState {
    entry: Option<CacheEntry>,
    /// Outcome of the most recent lookup, for callers that waited on it.
    last_outcome: Option<Result<CacheEntry, LookupError>>,
}

#[derive(Default)]
struct KeySlot {
    /// Number of lookups finished for this key. Bumped under `state`.
    completed: AtomicU64,
    state: Mutex<SlotState>,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

/// Thread-safe rate cache with a freshness window.
///
/// Entries are never evicted; a stale entry is overwritten by the next
/// successful lookup for its key. A failed lookup leaves the stored entry
/// untouched and is reported to the caller as-is.
pub struct RateCache {
    slots: DashMap<RateKey, Arc<KeySlot>>,
    entries: AtomicUsize,
    freshness: TimeDelta,
    lookup_timeout: Option<Duration>,
    clock: Arc<dyn Clock>,
    counters: Counters,
}

impl RateCache {
    /// Create a new rate cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(RateCacheConfig::default())
    }

    /// Create a new rate cache with custom configuration.
    pub fn with_config(config: RateCacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a new rate cache that reads time from `clock`.
    pub fn with_clock(config: RateCacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: DashMap::new(),
            entries: AtomicUsize::new(0),
            freshness: TimeDelta::from_std(config.freshness).unwrap_or(TimeDelta::MAX),
            lookup_timeout: config.lookup_timeout,
            clock,
            counters: Counters::default(),
        }
    }

    /// Get the rate for `source -> target`, fetching it through `lookup` when
    /// the cached value is missing or stale.
    pub async fn get_rate<P>(
        &self,
        source: &Currency,
        target: &Currency,
        lookup: &P,
    ) -> Result<f64, LookupError>
    where
        P: RateLookupPort + ?Sized,
    {
        self.resolve(source, target, lookup, self.lookup_timeout)
            .await
            .map(|quote| quote.rate)
    }

    /// Like [`get_rate`](Self::get_rate) with an explicit lookup timeout
    /// overriding the configured one.
    pub async fn get_rate_with_timeout<P>(
        &self,
        source: &Currency,
        target: &Currency,
        lookup: &P,
        timeout: Option<Duration>,
    ) -> Result<f64, LookupError>
    where
        P: RateLookupPort + ?Sized,
    {
        self.resolve(source, target, lookup, timeout)
            .await
            .map(|quote| quote.rate)
    }

    /// Get the rate together with the time it was fetched.
    pub async fn get_quote<P>(
        &self,
        source: &Currency,
        target: &Currency,
        lookup: &P,
    ) -> Result<CachedRate, LookupError>
    where
        P: RateLookupPort + ?Sized,
    {
        self.resolve(source, target, lookup, self.lookup_timeout)
            .await
    }

    async fn resolve<P>(
        &self,
        source: &Currency,
        target: &Currency,
        lookup: &P,
        timeout: Option<Duration>,
    ) -> Result<CachedRate, LookupError>
    where
        P: RateLookupPort + ?Sized,
    {
        let key = RateKey::new(source.clone(), target.clone());
        let slot = self.slot(&key);

        let seen = slot.completed.load(Ordering::Acquire);
        let mut state = slot.state.lock().await;

        if let Some(entry) = state.entry {
            if self.is_fresh(&entry) {
                debug!(pair = %key, "Cache hit");
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Self::quote(entry, true));
            }
        }

        // A lookup finished while we were queued on the slot: share its result.
        if slot.completed.load(Ordering::Acquire) != seen {
            if let Some(outcome) = &state.last_outcome {
                debug!(pair = %key, "Reusing concurrent lookup result");
                // `failures` tracks upstream calls, so a shared error is not recounted.
                if outcome.is_ok() {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                }
                return outcome.clone().map(|entry| Self::quote(entry, true));
            }
        }

        if state.entry.is_some() {
            debug!(pair = %key, "Cache entry expired");
            self.counters.refreshes.fetch_add(1, Ordering::Relaxed);
        } else {
            debug!(pair = %key, "Cache miss");
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
        }

        let outcome = self
            .lookup(&key, lookup, timeout)
            .await
            .map(|rate| CacheEntry {
                rate,
                fetched_at: self.clock.now(),
            });

        match &outcome {
            Ok(entry) => {
                if state.entry.replace(*entry).is_none() {
                    self.entries.fetch_add(1, Ordering::Relaxed);
                }
                debug!(pair = %key, rate = entry.rate, provider = lookup.name(), "Cached fresh rate");
            }
            Err(e) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                warn!(pair = %key, provider = lookup.name(), error = %e, "Rate lookup failed");
            }
        }

        state.last_outcome = Some(outcome.clone());
        slot.completed.fetch_add(1, Ordering::Release);

        outcome.map(|entry| Self::quote(entry, true))
    }

    /// Inspect the stored rate for a pair without triggering a lookup.
    ///
    /// Waits if a lookup for the same pair is in flight.
    pub async fn peek(&self, source: &Currency, target: &Currency) -> Option<CachedRate> {
        let key = RateKey::new(source.clone(), target.clone());
        let slot = self.slots.get(&key).map(|slot| Arc::clone(slot.value()))?;
        let state = slot.state.lock().await;
        state
            .entry
            .map(|entry| Self::quote(entry, self.is_fresh(&entry)))
    }

    /// Number of pairs with a stored rate.
    pub fn len(&self) -> usize {
        self.entries.load(Ordering::Relaxed)
    }

    /// Check if the cache holds no rates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            refreshes: self.counters.refreshes.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, key: &RateKey) -> Arc<KeySlot> {
        if let Some(slot) = self.slots.get(key) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.slots.entry(key.clone()).or_default().value())
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.clock.now().signed_duration_since(entry.fetched_at) < self.freshness
    }

    async fn lookup<P>(
        &self,
        key: &RateKey,
        lookup: &P,
        timeout: Option<Duration>,
    ) -> Result<f64, LookupError>
    where
        P: RateLookupPort + ?Sized,
    {
        let fetch = lookup.fetch(&key.source, &key.target);
        match timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .unwrap_or_else(|_| Err(LookupError::Timeout(limit))),
            None => fetch.await,
        }
    }

    fn quote(entry: CacheEntry, fresh: bool) -> CachedRate {
        CachedRate {
            rate: entry.rate,
            fetched_at: entry.fetched_at,
            fresh,
        }
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}
