//! Dashboard web surface
//!
//! Two read-only routes: the index page listing all states and a per-state
//! county page. Handlers query SQLite directly (one connection per query,
//! no pooling) and render complete HTML strings.

pub mod charts;
mod county_detail;
mod state_list;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::sync::Mutex;

use crate::cache::{CacheStore, CachedFetcher};
use crate::data::{CovidClient, NewsClient, NewsError};
use crate::db::{Database, DbError};

/// Shared stylesheet embedded in every page
pub(crate) const PAGE_STYLE: &str = "\
body{font-family:sans-serif;margin:2rem auto;max-width:72rem;padding:0 1rem;color:#222}\
table{border-collapse:collapse;margin:1rem 0}\
th,td{border:1px solid #ccc;padding:0.3rem 0.8rem;text-align:left}\
td:nth-child(n+2){text-align:right}\
.totals{font-size:1.1rem}\
.headlines li{margin:0.2rem 0}\
.chart{display:block;margin:1.5rem 0}";

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Statistics database
    pub db: Database,
    /// Store holding the persisted API caches
    pub cache: CacheStore,
    /// Statistics feed client (cache reads only at serve time)
    pub covid: CovidClient,
    /// Headlines client
    pub news: NewsClient,
    /// Memoized fetcher, serialized behind a lock since handlers share it
    pub fetcher: Arc<Mutex<CachedFetcher>>,
}

/// Errors surfaced by the request handlers
#[derive(Debug)]
enum WebError {
    NotFound(String),
    Internal(String),
}

impl From<DbError> for WebError {
    fn from(err: DbError) -> Self {
        WebError::Internal(err.to_string())
    }
}

impl From<NewsError> for WebError {
    fn from(err: NewsError) -> Self {
        WebError::Internal(err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            WebError::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

/// Builds the dashboard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(state_list_page))
        .route("/:state", get(county_detail_page))
        .with_state(state)
}

/// `GET /`: all states with aggregate charts and health headlines.
async fn state_list_page(State(app): State<AppState>) -> Result<Html<String>, WebError> {
    let states = app.db.list_states()?;
    let national = app.covid.national_summary_from_cache(&app.cache);

    let headlines = {
        let mut fetcher = app.fetcher.lock().await;
        app.news.top_headlines(&mut fetcher).await?
    };

    Ok(Html(state_list::render_state_list(
        national.as_ref(),
        &headlines,
        &states,
    )))
}

/// `GET /{state}`: counties of one state, looked up by exact name.
async fn county_detail_page(
    State(app): State<AppState>,
    Path(state_name): Path<String>,
) -> Result<Html<String>, WebError> {
    let totals = app
        .db
        .state_totals(&state_name)?
        .ok_or_else(|| WebError::NotFound(format!("no state named '{state_name}'")))?;
    let counties = app.db.counties_for_state(&state_name)?;

    Ok(Html(county_detail::render_county_detail(
        &state_name,
        totals,
        &counties,
    )))
}
