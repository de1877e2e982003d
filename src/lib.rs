//! COVID-19 Dashboard Library
//!
//! Fetches COVID-19 statistics and news headlines through a file-backed
//! request cache, persists flattened statistics into SQLite, and serves
//! dashboard pages with chart markup.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod db;
pub mod import;
pub mod web;
