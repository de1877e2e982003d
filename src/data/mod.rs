//! Core data models for the COVID-19 dashboard
//!
//! This module contains the record types produced by the API clients and
//! consumed by the import pipeline and the web pages.

pub mod covid;
pub mod news;

pub use covid::{CovidClient, CovidError};
pub use news::{NewsClient, NewsError};

use serde::{Deserialize, Serialize};

/// Nationwide totals for the United States
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalSummary {
    /// Total confirmed cases
    pub total_confirmed: u64,
    /// Total deaths
    pub total_deaths: u64,
}

/// Aggregate statistics for one US state, with its counties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateStats {
    /// State display name, unique within an import batch
    pub name: String,
    /// Total confirmed cases, always reported
    pub total_confirmed: u64,
    /// Total deaths, always reported at the state level
    pub total_deaths: u64,
    /// Counties belonging to this state; may be empty
    pub counties: Vec<CountyStats>,
}

/// Statistics for one county
///
/// `total_deaths` is optional while `total_confirmed` is not: the upstream
/// feed omits death counts for some counties, and the stored schema keeps
/// that asymmetry rather than inventing zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountyStats {
    /// County display name
    pub name: String,
    /// Total confirmed cases
    pub total_confirmed: u64,
    /// Total deaths, absent when the feed does not report them
    pub total_deaths: Option<u64>,
}

/// A news headline with its article link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    /// Article title
    pub title: String,
    /// Article URL
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_stats_serialization_roundtrip() {
        let state = StateStats {
            name: "Washington".to_string(),
            total_confirmed: 1000,
            total_deaths: 50,
            counties: vec![CountyStats {
                name: "King County".to_string(),
                total_confirmed: 600,
                total_deaths: Some(30),
            }],
        };

        let json = serde_json::to_string(&state).expect("Failed to serialize StateStats");
        let deserialized: StateStats =
            serde_json::from_str(&json).expect("Failed to deserialize StateStats");

        assert_eq!(deserialized, state);
    }

    #[test]
    fn test_county_deaths_may_be_absent() {
        let county = CountyStats {
            name: "Unorganized Borough".to_string(),
            total_confirmed: 12,
            total_deaths: None,
        };

        let json = serde_json::to_string(&county).expect("Failed to serialize CountyStats");
        let deserialized: CountyStats =
            serde_json::from_str(&json).expect("Failed to deserialize CountyStats");

        assert_eq!(deserialized.total_deaths, None);
        assert_eq!(deserialized.total_confirmed, 12);
    }

    #[test]
    fn test_state_with_no_counties() {
        let state = StateStats {
            name: "Wyoming".to_string(),
            total_confirmed: 10,
            total_deaths: 1,
            counties: Vec::new(),
        };

        assert!(state.counties.is_empty());
    }
}
