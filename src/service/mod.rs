//! The facade callers talk to.
//!
//! [`Spaces`] ties the engine to the cache: parse, fingerprint, look up,
//! compute on a miss, store. It is `Send + Sync`; share it behind an `Arc`.
mod examples;

pub use examples::{catalog, Example};

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::cache::{CacheStats, ComputationCache, Fingerprint};
use crate::config::Settings;
use crate::error::ServiceError;
use crate::input::{parse, Entry};
use crate::result::ComputationResult;

/// A result as handed to the caller, with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Served {
    #[serde(flatten)]
    pub result: Arc<ComputationResult>,
    pub cached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub environment: String,
    pub cache: CacheStats,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

#[derive(Debug)]
pub struct Spaces {
    settings: Settings,
    cache: ComputationCache,
}

impl Spaces {
    pub fn new(settings: Settings) -> Self {
        let cache = ComputationCache::new(settings.cache_size, settings.cache_ttl());
        Self { settings, cache }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the whole pipeline on raw rows, serving from the cache when the
    /// same matrix was computed recently.
    pub fn compute<R: AsRef<[Entry]>>(&self, rows: &[R]) -> Result<Served, ServiceError> {
        let matrix = parse(rows).inspect_err(|e| warn!("Validation error: {e}"))?;

        let key = Fingerprint::of(&matrix);
        if let Some(result) = self.cache.lookup(&key) {
            info!("Cache hit for matrix hash: {}...", key.short());
            return Ok(Served { result, cached: true });
        }
        info!("Cache miss - computing matrix hash: {}...", key.short());

        let start = Instant::now();
        let result = ComputationResult::compute(&matrix)
            .and_then(ComputationResult::ensure_valid)
            .inspect_err(|e| error!(key = key.as_str(), "Computation failed: {e}"))?;
        info!(
            rank = result.rank,
            "Computed {}×{} matrix in {:.3} ms",
            result.matrix.rows,
            result.matrix.cols,
            start.elapsed().as_secs_f64() * 1e3
        );

        let result = Arc::new(result);
        self.cache.insert(key, Arc::clone(&result));
        Ok(Served { result, cached: false })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Cache cleared");
    }

    pub fn health(&self) -> Health {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        Health {
            status: "healthy",
            environment: self.settings.environment.clone(),
            cache: self.cache.stats(),
            timestamp,
        }
    }

    pub fn examples(&self) -> Vec<Example> {
        catalog()
    }
}

impl Default for Spaces {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Axis, ValidationError};
    use serde_json::json;

    fn ints(rows: &[&[i64]]) -> Vec<Vec<Entry>> {
        rows.iter().map(|r| r.iter().copied().map(Entry::from).collect()).collect()
    }

    #[test]
    fn second_request_is_served_from_cache() {
        let spaces = Spaces::default();
        let rows = ints(&[&[1, 2, 3], &[4, 5, 6]]);

        let first = spaces.compute(&rows).unwrap();
        assert!(!first.cached);
        assert_eq!(first.result.rank, 2);

        let second = spaces.compute(&rows).unwrap();
        assert!(second.cached);
        assert!(Arc::ptr_eq(&first.result, &second.result));

        let stats = spaces.cache_stats();
        assert_eq!((stats.current_size, stats.hits, stats.misses), (1, 1, 1));

        spaces.clear_cache();
        assert!(!spaces.compute(&rows).unwrap().cached);
    }

    #[test]
    fn equal_values_hit_the_same_entry() {
        let spaces = Spaces::default();
        spaces.compute(&[vec![Entry::Float(0.5)]]).unwrap();
        assert!(spaces.compute(&[vec![Entry::from("1/2")]]).unwrap().cached);
    }

    #[test]
    fn six_by_six_is_a_validation_error() {
        let spaces = Spaces::default();
        let rows = vec![vec![Entry::Int(1); 6]; 6];
        let err = spaces.compute(&rows).unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::DimensionExceeded { axis: Axis::Rows, found: 6 })
        ));
        assert_eq!(spaces.cache_stats().current_size, 0);
    }

    #[test]
    fn served_json_is_flat() {
        let spaces = Spaces::default();
        let served = spaces.compute(&ints(&[&[1, 2], &[2, 4]])).unwrap();
        let json = serde_json::to_value(&served).unwrap();
        assert_eq!(json["cached"], json!(false));
        assert_eq!(json["rank"], json!(1));
        assert_eq!(json["null_space"]["dimension"], json!(1));
    }

    #[test]
    fn disabled_cache_always_recomputes() {
        let spaces = Spaces::new(Settings { cache_size: 0, ..Settings::default() });
        let rows = ints(&[&[1]]);
        spaces.compute(&rows).unwrap();
        assert!(!spaces.compute(&rows).unwrap().cached);
    }

    #[test]
    fn health_reports_cache_and_environment() {
        let spaces = Spaces::new(Settings { environment: "production".into(), ..Settings::default() });
        spaces.compute(&ints(&[&[1, 0], &[0, 1]])).unwrap();
        let health = spaces.health();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.environment, "production");
        assert_eq!(health.cache.current_size, 1);
        assert_eq!(health.cache.max_size, 100);
        assert!(health.timestamp > 0.0);
        assert_eq!(spaces.examples().len(), 12);
    }

    #[test]
    fn shared_between_threads() {
        let spaces = Arc::new(Spaces::default());
        let handles: Vec<_> = catalog()
            .into_iter()
            .map(|e| {
                let spaces = Arc::clone(&spaces);
                std::thread::spawn(move || {
                    let rows: Vec<Vec<Entry>> = e
                        .matrix
                        .iter()
                        .map(|r| r.iter().copied().map(Entry::from).collect())
                        .collect();
                    spaces.compute(&rows).map(|s| s.result.dimension_check.valid)
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap(), true);
        }
        assert_eq!(spaces.cache_stats().current_size, 12);
    }
}
