//! Cache manager holding the last live results and chart in memory
//!
//! Provides a `CacheManager` with one slot per dataset. Each entry remembers
//! when it was captured; freshness is judged against an injected clock at read
//! time, so entries are never deleted, only superseded.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::clock::Clock;
use crate::data::{ChartRow, ResultMap};

/// Default freshness window
pub const DEFAULT_FRESHNESS_MINUTES: i64 = 5;

/// Data stored in a slot, with its capture time
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug, Clone, PartialEq)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    pub cached_at: DateTime<Utc>,
    /// Whether the entry is older than the freshness window
    pub is_expired: bool,
}

/// In-memory cache for one board session
///
/// Holds a results slot and a chart slot. Reads return a copy of the entry
/// together with an `is_expired` flag; callers treat expired entries as
/// absent.
#[derive(Debug, Clone)]
pub struct CacheManager {
    freshness: Duration,
    clock: Arc<dyn Clock>,
    results: Option<CacheEntry<ResultMap>>,
    chart: Option<CacheEntry<Vec<ChartRow>>>,
}

impl CacheManager {
    /// Creates an empty cache with the given freshness window
    pub fn new(freshness: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            freshness,
            clock,
            results: None,
            chart: None,
        }
    }

    /// Creates an empty cache with the default five-minute window
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(Duration::minutes(DEFAULT_FRESHNESS_MINUTES), clock)
    }

    /// The freshness window entries are judged against
    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Reads the results slot
    pub fn read_results(&self) -> Option<CachedData<ResultMap>> {
        self.read(self.results.as_ref())
    }

    /// Replaces the results slot, stamped with the current time
    pub fn write_results(&mut self, data: ResultMap) {
        self.results = Some(self.entry(data));
    }

    /// Reads the chart slot
    pub fn read_chart(&self) -> Option<CachedData<Vec<ChartRow>>> {
        self.read(self.chart.as_ref())
    }

    /// Replaces the chart slot, stamped with the current time
    pub fn write_chart(&mut self, data: Vec<ChartRow>) {
        self.chart = Some(self.entry(data));
    }

    fn entry<T>(&self, data: T) -> CacheEntry<T> {
        CacheEntry {
            data,
            cached_at: self.clock.now(),
        }
    }

    fn read<T: Clone>(&self, entry: Option<&CacheEntry<T>>) -> Option<CachedData<T>> {
        let entry = entry?;
        let age = self.clock.now() - entry.cached_at;

        Some(CachedData {
            data: entry.data.clone(),
            cached_at: entry.cached_at,
            is_expired: age >= self.freshness,
        })
    }
}
