//! Memoized HTTP fetching
//!
//! `CachedFetcher` owns the HTTP client, the backing store, and the
//! in-memory cache maps, so memoization state is passed explicitly to the
//! callers that need it instead of living in process-wide globals.

use std::collections::HashMap;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use super::fingerprint::build_fingerprint;
use super::store::{CacheError, CacheMap, CacheStore};

/// Errors that can occur during a cache-miss fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON; propagated unchanged to the
    /// caller, there is no retry or fallback on a miss
    #[error("response was not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Persisting the updated cache failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Read-through / write-through fetcher over named caches
///
/// Lookups hit the in-memory maps only. A map starts empty and is filled
/// by misses during the process run; [`CachedFetcher::seed`] is the one
/// explicit way to pre-load it from disk. Every miss synchronously writes
/// the full map back through the store, so the file never lags memory by
/// more than one in-flight fetch.
#[derive(Debug)]
pub struct CachedFetcher {
    /// HTTP client for live requests
    http_client: Client,
    /// Backing store for persisted cache files
    store: CacheStore,
    /// In-memory contents of each named cache touched this run
    caches: HashMap<String, CacheMap>,
}

impl CachedFetcher {
    /// Creates a fetcher over the given store with empty in-memory caches.
    pub fn new(store: CacheStore) -> Self {
        Self {
            http_client: Client::new(),
            store,
            caches: HashMap::new(),
        }
    }

    /// Creates a fetcher with a custom HTTP client.
    #[allow(dead_code)]
    pub fn with_client(client: Client, store: CacheStore) -> Self {
        Self {
            http_client: client,
            store,
            caches: HashMap::new(),
        }
    }

    /// Loads the persisted contents of a named cache into memory,
    /// replacing whatever this run has accumulated for that name.
    pub fn seed(&mut self, cache_name: &str) {
        let loaded = self.store.open(cache_name);
        self.caches.insert(cache_name.to_string(), loaded);
    }

    /// Returns the cached response for (endpoint, params), fetching and
    /// persisting it first if this is a miss.
    ///
    /// On a hit the stored value is returned unchanged and no network
    /// traffic occurs. On a miss the endpoint is fetched with `params` as
    /// the query string, the body is parsed as JSON, stored under the
    /// request fingerprint, and the whole map is saved before returning.
    pub async fn fetch_with_cache(
        &mut self,
        cache_name: &str,
        endpoint: &str,
        params: &HashMap<String, String>,
    ) -> Result<Value, FetchError> {
        let key = build_fingerprint(endpoint, params);
        let entries = self.caches.entry(cache_name.to_string()).or_default();

        if let Some(value) = entries.get(&key) {
            tracing::debug!(cache = cache_name, fingerprint = %key, "cache hit");
            return Ok(value.clone());
        }

        tracing::info!(cache = cache_name, endpoint, "cache miss, fetching");
        let response = self.http_client.get(endpoint).query(params).send().await?;
        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;

        entries.insert(key, value.clone());
        self.store.save(cache_name, entries)?;
        Ok(value)
    }
}
