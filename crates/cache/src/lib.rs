//! Zap-out Cache
//!
//! Shared cache of contract reads keyed by `(namespace, chain, address, method, args)`.

pub mod read_cache;

pub use read_cache::{CacheStats, ReadCache};
