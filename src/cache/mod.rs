//! Cache module for the last live results
//!
//! This module provides an in-memory cache manager with a freshness window
//! measured against an injected clock. It returns entries past the window with
//! an `is_expired` flag; the fetcher treats those as misses.

mod manager;

pub use manager::{CacheManager, CachedData, DEFAULT_FRESHNESS_MINUTES};
