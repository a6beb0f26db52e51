use serde_json::Value;

/// AnalysisCache port: key -> JSON value with time-based expiry
///
/// The cache is a pure optimisation. A miss must always be answerable by
/// recomputing, so implementations may drop entries at any time.
/// Implementations must tolerate concurrent readers and writers.
pub trait AnalysisCache: Send + Sync {
    /// Returns the value for `key` if present and not expired
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous entry
    fn set(&self, key: &str, value: Value);

    /// `Some(key)` removes that key and every `key:*` entry; `None` clears everything
    fn invalidate(&self, key: Option<&str>);
}
