//! In-memory query cache with per-key staleness and request deduplication.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::state::QueryState;

/// Per-call options for [`QueryCache::fetch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    /// Age after which cached data is refetched.
    pub stale_time: Duration,
    /// Disabled queries never fetch and report [`QueryState::idle`].
    pub enabled: bool,
}

impl QueryOptions {
    /// Enabled query with the given staleness window.
    #[must_use]
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            enabled: true,
        }
    }

    /// Set whether the query runs.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Cached state of one key.
struct Entry<V, E> {
    data: Option<V>,
    error: Option<E>,
    updated_at: Option<Instant>,
    in_flight: bool,
    /// Bumped every time a fetch settles, so waiters can tell their fetch finished.
    generation: u64,
}

impl<V, E> Default for Entry<V, E> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            in_flight: false,
            generation: 0,
        }
    }
}

impl<V: Clone, E: Clone> Entry<V, E> {
    fn is_fresh(&self, now: Instant, stale_time: Duration) -> bool {
        self.data.is_some()
            && self
                .updated_at
                .is_some_and(|at| now.saturating_duration_since(at) < stale_time)
    }

    fn snapshot(&self) -> QueryState<V, E> {
        QueryState {
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: self.in_flight,
            updated_at: self.updated_at,
        }
    }
}

/// Thread-safe cache of query results keyed by `K`.
///
/// Entries are overwritten wholesale by their own fetch; distinct keys never
/// interact. Nothing is persisted: the cache lives as long as its owner.
pub struct QueryCache<K, V, E> {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<K, Entry<V, E>>>,
    /// Signalled whenever an in-flight fetch settles.
    settled: Condvar,
}

impl<K, V, E> QueryCache<K, V, E>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
    E: Clone,
{
    /// Create an empty cache reading time from the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache with a custom clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
            settled: Condvar::new(),
        }
    }

    /// Snapshot of a key without fetching.
    ///
    /// Unknown keys report [`QueryState::idle`].
    pub fn get(&self, key: &K) -> QueryState<V, E> {
        let entries = self.entries.lock().unwrap();
        entries
            .get(key)
            .map_or_else(QueryState::idle, Entry::snapshot)
    }

    /// Store a value for a key, clearing any previous error.
    pub fn set(&self, key: K, value: V) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(key).or_default();
        entry.data = Some(value);
        entry.error = None;
        entry.updated_at = Some(now);
    }

    /// Drop the cached data of a key if it is at least `stale_time` old.
    ///
    /// Returns `true` if data was dropped. Errors and in-flight state are kept.
    pub fn invalidate_if_stale(&self, key: &K, stale_time: Duration) -> bool {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        let Some(entry) = entries.get_mut(key) else {
            return false;
        };
        if entry.data.is_none() || entry.is_fresh(now, stale_time) {
            return false;
        }
        tracing::debug!(key = ?key, "Invalidating stale query");
        entry.data = None;
        entry.updated_at = None;
        true
    }

    /// Resolve a query.
    ///
    /// - Disabled queries return [`QueryState::idle`] without calling `fetcher`.
    /// - Data younger than `options.stale_time` is returned as is.
    /// - If another caller is already fetching the same key, waits for that
    ///   fetch and returns its outcome.
    /// - Otherwise calls `fetcher` once, without holding the cache lock, and
    ///   stores its result. Errors are stored next to any previous data and
    ///   are not retried.
    pub fn fetch<F>(&self, key: K, options: QueryOptions, fetcher: F) -> QueryState<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if !options.enabled {
            return QueryState::idle();
        }

        let mut entries = self.entries.lock().unwrap();
        loop {
            let generation = {
                let entry = entries.entry(key.clone()).or_default();
                if entry.is_fresh(self.clock.now(), options.stale_time) {
                    tracing::debug!(key = ?key, "Query cache hit");
                    return entry.snapshot();
                }
                if !entry.in_flight {
                    entry.in_flight = true;
                    break;
                }
                entry.generation
            };

            tracing::debug!(key = ?key, "Query in flight, waiting");
            entries = self
                .settled
                .wait_while(entries, |entries| {
                    entries
                        .get(&key)
                        .is_some_and(|e| e.in_flight && e.generation == generation)
                })
                .unwrap();

            if let Some(entry) = entries.get(&key)
                && entry.generation != generation
            {
                return entry.snapshot();
            }
        }
        drop(entries);

        tracing::debug!(key = ?key, "Query cache miss, fetching");
        let mut guard = FetchGuard {
            cache: self,
            key: Some(key.clone()),
        };
        let result = fetcher();
        guard.key = None;
        let now = self.clock.now();

        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(key).or_default();
        match result {
            Ok(value) => {
                entry.data = Some(value);
                entry.error = None;
                entry.updated_at = Some(now);
            }
            Err(err) => {
                entry.error = Some(err);
            }
        }
        entry.in_flight = false;
        entry.generation += 1;
        let snapshot = entry.snapshot();
        drop(entries);

        self.settled.notify_all();
        snapshot
    }
}

/// Releases a key whose fetcher unwound, so waiters and later callers do not
/// see it in flight forever.
struct FetchGuard<'a, K: Eq + Hash, V, E> {
    cache: &'a QueryCache<K, V, E>,
    /// `None` once the fetcher returned normally.
    key: Option<K>,
}

impl<K: Eq + Hash, V, E> Drop for FetchGuard<'_, K, V, E> {
    fn drop(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };
        tracing::warn!("Query fetcher panicked, releasing key");
        let mut entries = self
            .cache
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get_mut(&key) {
            entry.in_flight = false;
            entry.generation += 1;
        }
        drop(entries);
        self.cache.settled.notify_all();
    }
}

impl<K, V, E> Default for QueryCache<K, V, E>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
    E: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
