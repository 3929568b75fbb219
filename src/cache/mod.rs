//! Result caching.
//!
//! The cache is a plain key/value store with TTL, consumed strictly through
//! get/set ([`ResultCache`]). [`Gateway`] layers the read-through policy on
//! top of the transport: cache hit short-circuits the network, successful
//! non-empty results are stored, errors and empty results never are.

mod backend;
mod gateway;
pub mod key;

pub use backend::{MemoryCache, NullCache, ResultCache};
pub use gateway::{CacheStats, Gateway, DEFAULT_TTL};
