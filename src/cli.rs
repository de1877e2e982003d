//! Command-line interface
//!
//! Two subcommands: `import` rebuilds the database from the statistics
//! feed (through the request cache), `serve` runs the dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::cache::CacheStore;
use crate::db::DEFAULT_DB_NAME;

/// Errors from resolving CLI arguments into runtime configuration
#[derive(Debug, Error)]
pub enum CliError {
    /// No cache directory given and the platform default is unavailable
    #[error("no cache directory: pass --cache-dir (platform cache dir unavailable)")]
    NoCacheDir,
}

/// COVID-19 dashboard: cached API import and chart pages
#[derive(Parser, Debug)]
#[command(name = "covidash")]
#[command(about = "COVID-19 statistics dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the statistics feed and rebuild the database (full replace)
    Import {
        /// Path of the SQLite database file
        #[arg(long, default_value = DEFAULT_DB_NAME)]
        db: PathBuf,

        /// Directory holding the JSON cache files (defaults to the
        /// platform cache directory)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Serve the dashboard pages
    Serve {
        /// Path of the SQLite database file
        #[arg(long, default_value = DEFAULT_DB_NAME)]
        db: PathBuf,

        /// Directory holding the JSON cache files (defaults to the
        /// platform cache directory)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Port to listen on
        #[arg(long, default_value_t = 8000)]
        port: u16,

        /// File containing the NYT API key (overrides the default
        /// location; the NYT_API_KEY environment variable wins over both)
        #[arg(long)]
        api_key_file: Option<PathBuf>,
    },
}

/// Resolves the cache store from an optional override directory.
pub fn resolve_cache_store(cache_dir: Option<PathBuf>) -> Result<CacheStore, CliError> {
    match cache_dir {
        Some(dir) => Ok(CacheStore::with_dir(dir)),
        None => CacheStore::new().ok_or(CliError::NoCacheDir),
    }
}
