//! Request caching for external API responses
//!
//! This module provides the request-memoization core: a deterministic
//! fingerprint for each (endpoint, params) request, a file-backed store
//! holding one JSON mapping per named cache, and a fetcher that returns
//! cached responses and only goes to the network on a miss.

mod fetcher;
mod fingerprint;
mod store;

pub use fetcher::{CachedFetcher, FetchError};
pub use fingerprint::build_fingerprint;
pub use store::{CacheError, CacheMap, CacheStore};
