//! Bing COVID-19 data client
//!
//! Fetches the worldwide statistics feed through the memoized fetcher and
//! flattens the nested geographic `areas` tree into national, state, and
//! county records. The feed nests World -> countries -> states -> counties,
//! with the United States as the first country entry.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::{CountyStats, NationalSummary, StateStats};
use crate::cache::{build_fingerprint, CacheStore, CachedFetcher, FetchError};

/// Endpoint for the Bing COVID-19 statistics feed
const BING_COVID_URL: &str = "https://bing.com/covid/data";

/// Name of the cache file holding the statistics feed
pub const COVID_CACHE_NAME: &str = "bing_cache.json";

/// Errors that can occur when fetching or flattening COVID data
#[derive(Debug, Error)]
pub enum CovidError {
    /// Fetch or cache failure from the memoized fetcher
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response did not match the expected areas tree
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(#[from] serde_json::Error),

    /// Missing expected entry in the response
    #[error("missing expected entry in response: {0}")]
    MissingEntry(String),
}

/// One node of the feed's geographic tree
#[derive(Debug, Deserialize)]
struct AreaNode {
    #[serde(rename = "displayName")]
    display_name: String,
    #[serde(rename = "totalConfirmed", default)]
    total_confirmed: Option<u64>,
    #[serde(rename = "totalDeaths", default)]
    total_deaths: Option<u64>,
    #[serde(default)]
    areas: Vec<AreaNode>,
}

/// Client for the Bing COVID-19 statistics feed
#[derive(Debug, Clone)]
pub struct CovidClient {
    /// Feed endpoint (allows override for testing)
    endpoint: String,
}

impl Default for CovidClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CovidClient {
    /// Creates a client against the production feed endpoint.
    pub fn new() -> Self {
        Self {
            endpoint: BING_COVID_URL.to_string(),
        }
    }

    /// Creates a client against a custom endpoint (for testing).
    #[cfg(test)]
    pub fn with_endpoint(endpoint: String) -> Self {
        Self { endpoint }
    }

    /// Fetches the feed through the memoized fetcher and flattens the US
    /// subtree into state and county records.
    ///
    /// The feed takes no parameters, so the cached fingerprint is the
    /// endpoint with a bare trailing separator.
    pub async fn fetch_us_states(
        &self,
        fetcher: &mut CachedFetcher,
    ) -> Result<(NationalSummary, Vec<StateStats>), CovidError> {
        let document = fetcher
            .fetch_with_cache(COVID_CACHE_NAME, &self.endpoint, &HashMap::new())
            .await?;
        flatten_us_states(&document)
    }

    /// Reads the persisted feed from disk and returns the US totals, if the
    /// cache holds a previously fetched document.
    ///
    /// This is a plain disk read through [`CacheStore::open`]; it does not
    /// touch the network and returns `None` on a cold or unparseable cache.
    pub fn national_summary_from_cache(&self, store: &CacheStore) -> Option<NationalSummary> {
        let cache = store.open(COVID_CACHE_NAME);
        let key = build_fingerprint(&self.endpoint, &HashMap::new());
        let document = cache.get(&key)?;
        let (summary, _) = flatten_us_states(document).ok()?;
        Some(summary)
    }
}

/// Flattens a feed document into US totals and per-state records.
///
/// The first entry of the world's `areas` is the United States; its areas
/// are states, and each state's areas are counties. County death counts may
/// be absent and stay `None`.
fn flatten_us_states(document: &Value) -> Result<(NationalSummary, Vec<StateStats>), CovidError> {
    let world: AreaNode = serde_json::from_value(document.clone())?;
    let united_states = world
        .areas
        .first()
        .ok_or_else(|| CovidError::MissingEntry("world has no country areas".to_string()))?;

    let summary = NationalSummary {
        total_confirmed: united_states.total_confirmed.ok_or_else(|| {
            CovidError::MissingEntry("United States totalConfirmed".to_string())
        })?,
        total_deaths: united_states
            .total_deaths
            .ok_or_else(|| CovidError::MissingEntry("United States totalDeaths".to_string()))?,
    };

    let mut states = Vec::with_capacity(united_states.areas.len());
    for state in &united_states.areas {
        let counties = state
            .areas
            .iter()
            .map(|county| CountyStats {
                name: county.display_name.clone(),
                total_confirmed: county.total_confirmed.unwrap_or(0),
                total_deaths: county.total_deaths,
            })
            .collect();

        states.push(StateStats {
            name: state.display_name.clone(),
            total_confirmed: state.total_confirmed.ok_or_else(|| {
                CovidError::MissingEntry(format!("{} totalConfirmed", state.display_name))
            })?,
            total_deaths: state.total_deaths.ok_or_else(|| {
                CovidError::MissingEntry(format!("{} totalDeaths", state.display_name))
            })?,
            counties,
        });
    }

    Ok((summary, states))
}
