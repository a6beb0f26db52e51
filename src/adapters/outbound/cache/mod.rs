/// Cache adapters
mod in_memory_cache;

pub use in_memory_cache::{InMemoryAnalysisCache, DEFAULT_CACHE_TTL};
