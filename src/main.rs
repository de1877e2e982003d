//! COVID-19 Dashboard - cached API import and chart pages
//!
//! `covidash import` fetches the statistics feed (memoized through the
//! request cache) and rebuilds the SQLite database; `covidash serve` runs
//! the dashboard on a local port.

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use covidash::cache::CachedFetcher;
use covidash::cli::{resolve_cache_store, Cli, Command};
use covidash::config;
use covidash::data::covid::COVID_CACHE_NAME;
use covidash::data::news::NEWS_CACHE_NAME;
use covidash::data::{CovidClient, NewsClient};
use covidash::db::Database;
use covidash::import;
use covidash::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("covidash=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Import { db, cache_dir } => {
            let store = resolve_cache_store(cache_dir)?;
            let database = Database::new(&db);
            let mut fetcher = CachedFetcher::new(store);
            fetcher.seed(COVID_CACHE_NAME);
            let client = CovidClient::new();

            let summary = import::run_import(&database, &mut fetcher, &client).await?;
            println!(
                "Imported {} states and {} counties into {} ({} counties without a state reference)",
                summary.states,
                summary.counties,
                db.display(),
                summary.counties_without_state,
            );
        }
        Command::Serve { db, cache_dir, port, api_key_file } => {
            let store = resolve_cache_store(cache_dir)?;
            let api_key = config::load_api_key(api_key_file.as_deref())?;

            let mut fetcher = CachedFetcher::new(store.clone());
            fetcher.seed(NEWS_CACHE_NAME);

            let state = AppState {
                db: Database::new(&db),
                cache: store,
                covid: CovidClient::new(),
                news: NewsClient::new(api_key),
                fetcher: Arc::new(Mutex::new(fetcher)),
            };

            let app = web::router(state);
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
            tracing::info!(port, "dashboard listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
