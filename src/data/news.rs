//! NY Times Top Stories client
//!
//! Fetches the health section of the NYT Top Stories API through the
//! memoized fetcher and returns the leading headlines. The API requires a
//! static key, passed as the `api-key` query parameter (and therefore part
//! of the cached request fingerprint).

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::Headline;
use crate::cache::{CachedFetcher, FetchError};

/// Endpoint for the NYT Top Stories health section
const NYT_TOP_STORIES_URL: &str = "https://api.nytimes.com/svc/topstories/v2/health.json";

/// Name of the cache file holding the headlines feed
pub const NEWS_CACHE_NAME: &str = "ny_times_cache.json";

/// How many headlines the dashboard shows
pub const HEADLINE_COUNT: usize = 5;

/// Errors that can occur when fetching headlines
#[derive(Debug, Error)]
pub enum NewsError {
    /// Fetch or cache failure from the memoized fetcher
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response did not match the expected top-stories shape
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(#[from] serde_json::Error),
}

/// Top Stories response envelope
#[derive(Debug, Deserialize)]
struct TopStoriesResponse {
    results: Vec<Story>,
}

/// A single story from the Top Stories feed
#[derive(Debug, Deserialize)]
struct Story {
    title: String,
    url: String,
}

/// Client for the NYT Top Stories API
#[derive(Debug, Clone)]
pub struct NewsClient {
    /// Feed endpoint (allows override for testing)
    endpoint: String,
    /// Static API key
    api_key: String,
}

impl NewsClient {
    /// Creates a client against the production endpoint with the given key.
    pub fn new(api_key: String) -> Self {
        Self {
            endpoint: NYT_TOP_STORIES_URL.to_string(),
            api_key,
        }
    }

    /// Creates a client against a custom endpoint (for testing).
    #[cfg(test)]
    pub fn with_endpoint(endpoint: String, api_key: String) -> Self {
        Self { endpoint, api_key }
    }

    /// Fetches the feed and returns the first [`HEADLINE_COUNT`] headlines.
    pub async fn top_headlines(
        &self,
        fetcher: &mut CachedFetcher,
    ) -> Result<Vec<Headline>, NewsError> {
        let mut params = HashMap::new();
        params.insert("api-key".to_string(), self.api_key.clone());

        let document = fetcher
            .fetch_with_cache(NEWS_CACHE_NAME, &self.endpoint, &params)
            .await?;
        parse_headlines(&document)
    }
}

/// Extracts the leading headlines from a Top Stories document.
fn parse_headlines(document: &Value) -> Result<Vec<Headline>, NewsError> {
    let response: TopStoriesResponse = serde_json::from_value(document.clone())?;
    Ok(response
        .results
        .into_iter()
        .take(HEADLINE_COUNT)
        .map(|story| Headline {
            title: story.title,
            url: story.url,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn story(n: usize) -> Value {
        json!({
            "title": format!("Story {n}"),
            "url": format!("https://example.com/{n}"),
            "section": "health",
            "abstract": "..."
        })
    }

    #[test]
    fn test_parse_headlines_takes_first_five() {
        let document = json!({
            "status": "OK",
            "results": (0..8).map(story).collect::<Vec<_>>()
        });

        let headlines = parse_headlines(&document).expect("parse should succeed");

        assert_eq!(headlines.len(), 5);
        assert_eq!(headlines[0].title, "Story 0");
        assert_eq!(headlines[4].url, "https://example.com/4");
    }

    #[test]
    fn test_parse_headlines_with_fewer_than_five() {
        let document = json!({"results": [story(1), story(2)]});

        let headlines = parse_headlines(&document).expect("parse should succeed");
        assert_eq!(headlines.len(), 2);
    }

    #[test]
    fn test_parse_headlines_empty_results() {
        let document = json!({"results": []});

        let headlines = parse_headlines(&document).expect("parse should succeed");
        assert!(headlines.is_empty());
    }

    #[test]
    fn test_parse_headlines_wrong_shape_fails() {
        let document = json!({"fault": "invalid key"});

        assert!(matches!(
            parse_headlines(&document),
            Err(NewsError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_client_carries_api_key() {
        let client = NewsClient::with_endpoint("http://localhost:9/news".to_string(), "k".to_string());
        assert_eq!(client.api_key, "k");
        assert_eq!(client.endpoint, "http://localhost:9/news");
    }
}
