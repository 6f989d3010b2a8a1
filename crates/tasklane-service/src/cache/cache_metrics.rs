//! Prometheus metrics for the task list cache.
//!
//! Cache failures never reach callers, so these counters are the only place
//! an unreachable cache shows up besides the logs.

use metrics::{counter, describe_counter};

/// Metric names for the task list cache.
pub mod names {
    /// Reads answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "tasklane_cache_hits_total";
    /// Reads that fell back to the store.
    pub const CACHE_MISSES_TOTAL: &str = "tasklane_cache_misses_total";
    /// Cache operations that failed and were swallowed.
    pub const CACHE_ERRORS_TOTAL: &str = "tasklane_cache_errors_total";
    /// Successful invalidations after a committed write.
    pub const CACHE_INVALIDATIONS_TOTAL: &str = "tasklane_cache_invalidations_total";
}

/// Cache operation label values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOperation {
    Get,
    Set,
    Delete,
}

impl CacheOperation {
    /// Label value for this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Delete => "delete",
        }
    }
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_HITS_TOTAL,
        "Total number of task list reads served from the cache"
    );
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total number of task list reads served from the store"
    );
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Total number of failed cache operations"
    );
    describe_counter!(
        names::CACHE_INVALIDATIONS_TOTAL,
        "Total number of task list invalidations"
    );
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a read served from the cache.
    pub fn hit(key: &str) {
        counter!(names::CACHE_HITS_TOTAL, "key" => key.to_string()).increment(1);
    }

    /// Record a read served from the store.
    pub fn miss(key: &str) {
        counter!(names::CACHE_MISSES_TOTAL, "key" => key.to_string()).increment(1);
    }

    /// Record a swallowed cache failure.
    pub fn error(key: &str, operation: CacheOperation) {
        counter!(
            names::CACHE_ERRORS_TOTAL,
            "key" => key.to_string(),
            "operation" => operation.as_str()
        )
        .increment(1);
    }

    /// Record an invalidation.
    pub fn invalidated(key: &str) {
        counter!(names::CACHE_INVALIDATIONS_TOTAL, "key" => key.to_string()).increment(1);
    }
}
