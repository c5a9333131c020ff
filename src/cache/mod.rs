//! Content-addressed store of finished computations.
//!
//! Keys are [`Fingerprint`]s of the parsed matrix. The store is bounded by a
//! capacity (least-recently-accessed entry goes first) and by a time-to-live
//! measured from insertion. Expired entries are purged at the start of every
//! operation. All state sits behind one [`parking_lot::Mutex`].
mod fingerprint;

pub use fingerprint::Fingerprint;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::result::ComputationResult;

#[derive(Debug)]
struct Entry {
    result: Arc<ComputationResult>,
    inserted_at: Instant,
    accessed_at: Instant,
    /// Key into [`CacheState::recency`].
    tick: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    store: HashMap<Fingerprint, Entry>,
    /// Access order; the smallest tick is the least recently used.
    recency: BTreeMap<u64, Fingerprint>,
    next_tick: u64,
    hits: u64,
    misses: u64,
}

impl CacheState {
    fn stamp(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }

    fn remove(&mut self, key: &Fingerprint) -> Option<Entry> {
        let entry = self.store.remove(key)?;
        self.recency.remove(&entry.tick);
        Some(entry)
    }

    fn purge_expired(&mut self, ttl: Duration, now: Instant) {
        let expired: Vec<Fingerprint> = self
            .store
            .iter()
            .filter(|(_, e)| now.saturating_duration_since(e.inserted_at) > ttl)
            .map(|(k, _)| k.clone())
            .collect();
        for key in expired {
            self.remove(&key);
        }
    }

    /// `false` once there is nothing left to evict.
    fn evict_lru(&mut self, now: Instant) -> bool {
        let Some((_, key)) = self.recency.pop_first() else {
            return false;
        };
        if let Some(entry) = self.store.remove(&key) {
            debug!(
                key = key.short(),
                idle = ?now.saturating_duration_since(entry.accessed_at),
                "evicted least recently used entry"
            );
        }
        true
    }
}

/// Snapshot of the cache counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub current_size: usize,
    pub max_size: usize,
    pub ttl_seconds: u64,
    /// `current_size / max_size` as a percentage, rounded to two decimals.
    pub utilization_percent: f64,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
pub struct ComputationCache {
    capacity: usize,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl ComputationCache {
    /// An empty cache holding at most `capacity` results for `ttl` each.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn lookup(&self, key: &Fingerprint) -> Option<Arc<ComputationResult>> {
        self.lookup_at(key, Instant::now())
    }

    pub fn lookup_at(&self, key: &Fingerprint, now: Instant) -> Option<Arc<ComputationResult>> {
        let mut state = self.state.lock();
        state.purge_expired(self.ttl, now);

        let tick = state.stamp();
        let CacheState { store, recency, .. } = &mut *state;
        let found = store.get_mut(key).map(|entry| {
            recency.remove(&entry.tick);
            recency.insert(tick, key.clone());
            entry.tick = tick;
            entry.accessed_at = now;
            Arc::clone(&entry.result)
        });

        match found {
            Some(_) => state.hits += 1,
            None => state.misses += 1,
        }
        found
    }

    /// Stores `result` under `key`, replacing any previous entry and
    /// resetting its timestamps.
    pub fn insert(&self, key: Fingerprint, result: Arc<ComputationResult>) {
        self.insert_at(key, result, Instant::now())
    }

    pub fn insert_at(&self, key: Fingerprint, result: Arc<ComputationResult>, now: Instant) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.state.lock();
        state.purge_expired(self.ttl, now);
        state.remove(&key);
        while state.store.len() >= self.capacity && state.evict_lru(now) {}

        let tick = state.stamp();
        state.recency.insert(tick, key.clone());
        state.store.insert(
            key,
            Entry {
                result,
                inserted_at: now,
                accessed_at: now,
                tick,
            },
        );
    }

    /// Drops every entry and resets the hit/miss counters.
    pub fn clear(&self) {
        *self.state.lock() = CacheState::default();
    }

    pub fn len(&self) -> usize {
        self.len_at(Instant::now())
    }

    fn len_at(&self, now: Instant) -> usize {
        let mut state = self.state.lock();
        state.purge_expired(self.ttl, now);
        state.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats_at(Instant::now())
    }

    pub fn stats_at(&self, now: Instant) -> CacheStats {
        let mut state = self.state.lock();
        state.purge_expired(self.ttl, now);
        let current_size = state.store.len();
        let utilization_percent = if self.capacity == 0 {
            0.0
        } else {
            (current_size as f64 / self.capacity as f64 * 10_000.0).round() / 100.0
        };
        CacheStats {
            current_size,
            max_size: self.capacity,
            ttl_seconds: self.ttl.as_secs(),
            utilization_percent,
            hits: state.hits,
            misses: state.misses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Matrix;
    use approx::assert_relative_eq;

    fn entry(rows: &[&[i64]]) -> (Fingerprint, Arc<ComputationResult>) {
        let a = Matrix::from_integers(rows).unwrap();
        let result = ComputationResult::compute(&a).unwrap();
        (Fingerprint::of(&a), Arc::new(result))
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn round_trip_then_clear() {
        let cache = ComputationCache::new(4, secs(60));
        let (key, result) = entry(&[&[1, 2], &[2, 4]]);
        assert!(cache.lookup(&key).is_none());

        cache.insert(key.clone(), Arc::clone(&result));
        let hit = cache.lookup(&key).unwrap();
        assert!(Arc::ptr_eq(&hit, &result));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.lookup(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = ComputationCache::new(4, secs(10));
        let t0 = Instant::now();
        let (key, result) = entry(&[&[1]]);
        cache.insert_at(key.clone(), result, t0);

        assert!(cache.lookup_at(&key, t0 + secs(10)).is_some());
        // Access does not extend the lifetime.
        assert!(cache.lookup_at(&key, t0 + secs(11)).is_none());
        assert_eq!(cache.stats_at(t0 + secs(11)).current_size, 0);
    }

    #[test]
    fn least_recently_used_goes_first() {
        let cache = ComputationCache::new(2, secs(60));
        let t0 = Instant::now();
        let (a, ra) = entry(&[&[1]]);
        let (b, rb) = entry(&[&[2]]);
        let (c, rc) = entry(&[&[3]]);

        cache.insert_at(a.clone(), ra, t0);
        cache.insert_at(b.clone(), rb, t0 + secs(1));
        assert!(cache.lookup_at(&a, t0 + secs(2)).is_some());
        cache.insert_at(c.clone(), rc, t0 + secs(3));

        assert!(cache.lookup_at(&a, t0 + secs(4)).is_some());
        assert!(cache.lookup_at(&b, t0 + secs(4)).is_none());
        assert!(cache.lookup_at(&c, t0 + secs(4)).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinsert_replaces_and_resets_the_clock() {
        let cache = ComputationCache::new(2, secs(10));
        let t0 = Instant::now();
        let (key, first) = entry(&[&[1, 0], &[0, 1]]);
        let (_, second) = entry(&[&[1, 1], &[1, 1]]);

        cache.insert_at(key.clone(), first, t0);
        cache.insert_at(key.clone(), Arc::clone(&second), t0 + secs(8));
        assert_eq!(cache.stats_at(t0 + secs(8)).current_size, 1);

        let hit = cache.lookup_at(&key, t0 + secs(15)).unwrap();
        assert!(Arc::ptr_eq(&hit, &second));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let cache = ComputationCache::new(0, secs(60));
        let (key, result) = entry(&[&[1]]);
        cache.insert(key.clone(), result);
        assert!(cache.lookup(&key).is_none());
        assert_relative_eq!(cache.stats().utilization_percent, 0.0);
    }

    #[test]
    fn stats_count_hits_and_misses() {
        let cache = ComputationCache::new(3, secs(3600));
        let (a, ra) = entry(&[&[1]]);
        let (b, _) = entry(&[&[2]]);
        cache.insert(a.clone(), ra);
        cache.lookup(&a);
        cache.lookup(&a);
        cache.lookup(&b);

        let stats = cache.stats();
        assert_eq!(stats.current_size, 1);
        assert_eq!(stats.max_size, 3);
        assert_eq!(stats.ttl_seconds, 3600);
        assert_eq!((stats.hits, stats.misses), (2, 1));
        assert_relative_eq!(stats.utilization_percent, 33.33);

        cache.clear();
        let stats = cache.stats();
        assert_eq!((stats.current_size, stats.hits, stats.misses), (0, 0, 0));
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(ComputationCache::new(8, secs(60)));
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let (key, result) = entry(&[&[i]]);
                    cache.insert(key.clone(), result);
                    cache.lookup(&key).is_some()
                })
            })
            .collect();
        assert!(handles.into_iter().all(|h| h.join().unwrap()));
        assert_eq!(cache.len(), 4);
    }
}
