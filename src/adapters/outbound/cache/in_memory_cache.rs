use crate::ports::outbound::AnalysisCache;
use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// In-process analysis cache backed by `DashMap`.
///
/// Entries expire `ttl` after they were written; expired entries are removed
/// lazily on read. A zero TTL turns the cache into a no-op.
pub struct InMemoryAnalysisCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl InMemoryAnalysisCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryAnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl AnalysisCache for InMemoryAnalysisCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                debug!(key, "cache hit");
                return Some(entry.value.clone());
            }
        }
        // The read guard above is released before removal to avoid a shard deadlock
        if self.entries.remove_if(key, |_, e| e.expires_at <= now).is_some() {
            debug!(key, "cache entry expired");
        }
        None
    }

    fn set(&self, key: &str, value: Value) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    fn invalidate(&self, key: Option<&str>) {
        match key {
            Some(key) => {
                let prefix = format!("{}:", key);
                self.entries
                    .retain(|k, _| k != key && !k.starts_with(&prefix));
                debug!(key, "cache invalidated");
            }
            None => {
                self.entries.clear();
                debug!("cache cleared");
            }
        }
    }
}
