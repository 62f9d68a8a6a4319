//! Per-call query options.

use std::collections::BTreeMap;
use std::time::Duration;

/// Cache duration used when a call does not specify one (7 days).
pub const DEFAULT_CACHE_TIME: Duration = Duration::from_secs(604_800);

/// Cache duration for search endpoints (1 day).
pub const SEARCH_CACHE_TIME: Duration = Duration::from_secs(86_400);

/// Options for a single catalog call.
///
/// `additional_params` are overlaid on the default query parameters and
/// always win on key collision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct QueryOptions {
    /// Advisory cache duration handed to the HTTP cache layer.
    pub cache_time: Option<Duration>,
    /// Extra query parameters.
    pub additional_params: BTreeMap<String, String>,
}

impl QueryOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache duration.
    #[must_use]
    pub const fn cache_time(mut self, duration: Duration) -> Self {
        self.cache_time = Some(duration);
        self
    }

    /// Adds or replaces a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_params.insert(key.into(), value.into());
        self
    }

    /// Cache duration in effect for this call.
    #[must_use]
    pub fn effective_cache_time(&self) -> Duration {
        self.cache_time.unwrap_or(DEFAULT_CACHE_TIME)
    }

    /// Overlays `other` on top of `self`; `other` wins on every key and on cache time.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        if other.cache_time.is_some() {
            self.cache_time = other.cache_time;
        }
        self.additional_params.extend(other.additional_params);
        self
    }
}
