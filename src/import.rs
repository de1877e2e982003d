//! Import pipeline
//!
//! A linear batch pass: fetch the statistics feed through the memoized
//! fetcher, flatten the nested geography, then replace the contents of both
//! tables. A county whose owning state cannot be found is stored with a
//! NULL reference rather than failing the run.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::cache::CachedFetcher;
use crate::data::{CovidClient, CovidError, StateStats};
use crate::db::{Database, DbError};

/// Errors that can occur during an import run
#[derive(Debug, Error)]
pub enum ImportError {
    /// Fetching or flattening the feed failed
    #[error(transparent)]
    Covid(#[from] CovidError),

    /// Writing to the database failed
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Counters from a completed import run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of state rows written
    pub states: u64,
    /// Number of county rows written
    pub counties: u64,
    /// County rows stored with a NULL owning-state reference
    pub counties_without_state: u64,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

/// Fetches the feed and runs a full-replace import.
pub async fn run_import(
    db: &Database,
    fetcher: &mut CachedFetcher,
    client: &CovidClient,
) -> Result<ImportSummary, ImportError> {
    let (summary, states) = client.fetch_us_states(fetcher).await?;
    tracing::info!(
        us_confirmed = summary.total_confirmed,
        us_deaths = summary.total_deaths,
        states = states.len(),
        "fetched statistics feed"
    );
    Ok(load_states(db, &states)?)
}

/// Replaces both tables with the given state records.
///
/// States are inserted first in one transaction, then counties in another,
/// each county resolving its owning state by name at insert time.
pub fn load_states(db: &Database, states: &[StateStats]) -> Result<ImportSummary, DbError> {
    db.create_schema()?;
    db.insert_states(states)?;
    let county_stats = db.insert_counties(states)?;

    let summary = ImportSummary {
        states: states.len() as u64,
        counties: county_stats.inserted,
        counties_without_state: county_stats.without_state,
        finished_at: Utc::now(),
    };
    tracing::info!(
        states = summary.states,
        counties = summary.counties,
        counties_without_state = summary.counties_without_state,
        "import complete"
    );
    Ok(summary)
}
