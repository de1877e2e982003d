//! End-to-end import tests, offline
//!
//! Drives the pipeline from a cached feed document through flattening and
//! the full-replace load, then reads back through the query layer the web
//! pages use. No network: the feed is planted in the cache file the way a
//! previous fetch would have left it.

use std::collections::HashMap;

use covidash::cache::{build_fingerprint, CacheMap, CacheStore};
use covidash::data::{CountyStats, CovidClient, StateStats};
use covidash::db::Database;
use covidash::import::load_states;
use tempfile::TempDir;

/// Feed fixture with one fully populated state, one state without
/// counties, and a county missing its death count.
const FEED: &str = r#"{
    "displayName": "Worldwide",
    "totalConfirmed": 5000000,
    "totalDeaths": 300000,
    "areas": [
        {
            "displayName": "United States",
            "totalConfirmed": 1500000,
            "totalDeaths": 90000,
            "areas": [
                {
                    "displayName": "Washington",
                    "totalConfirmed": 18000,
                    "totalDeaths": 1000,
                    "areas": [
                        {"displayName": "King County", "totalConfirmed": 7700, "totalDeaths": 540},
                        {"displayName": "Snohomish County", "totalConfirmed": 2900, "totalDeaths": null}
                    ]
                },
                {
                    "displayName": "Wyoming",
                    "totalConfirmed": 700,
                    "totalDeaths": 20,
                    "areas": []
                }
            ]
        }
    ]
}"#;

fn state(name: &str, counties: Vec<CountyStats>) -> StateStats {
    StateStats {
        name: name.to_string(),
        total_confirmed: 100,
        total_deaths: 10,
        counties,
    }
}

#[test]
fn test_load_then_query_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db = Database::new(temp_dir.path().join("covid.sqlite"));

    let states = vec![
        state(
            "Washington",
            vec![
                CountyStats {
                    name: "King County".to_string(),
                    total_confirmed: 7_700,
                    total_deaths: Some(540),
                },
                CountyStats {
                    name: "Snohomish County".to_string(),
                    total_confirmed: 2_900,
                    total_deaths: None,
                },
            ],
        ),
        state("Wyoming", Vec::new()),
    ];

    let summary = load_states(&db, &states).expect("load should succeed");
    assert_eq!(summary.states, 2);
    assert_eq!(summary.counties, 2);
    assert_eq!(summary.counties_without_state, 0);

    let listed = db.list_states().expect("list should succeed");
    assert_eq!(listed.len(), 2);

    let counties = db.counties_for_state("Washington").expect("query should succeed");
    assert_eq!(counties.len(), 2);
    assert_eq!(counties[0].name, "King County");
    assert_eq!(counties[0].total_deaths, Some(540));
    assert_eq!(counties[1].total_deaths, None);

    assert!(db.counties_for_state("Wyoming").expect("query should succeed").is_empty());
}

#[test]
fn test_cached_feed_drives_summary_without_network() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = CacheStore::with_dir(temp_dir.path().to_path_buf());
    let client = CovidClient::new();

    // Plant the feed exactly as a previous run's miss would have saved it.
    let mut map = CacheMap::new();
    map.insert(
        build_fingerprint("https://bing.com/covid/data", &HashMap::new()),
        serde_json::from_str(FEED).expect("fixture should parse"),
    );
    store.save("bing_cache.json", &map).expect("save should succeed");

    let summary = client
        .national_summary_from_cache(&store)
        .expect("warm cache should yield the US totals");
    assert_eq!(summary.total_confirmed, 1_500_000);
    assert_eq!(summary.total_deaths, 90_000);
}

#[test]
fn test_reimport_is_full_replace() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db = Database::new(temp_dir.path().join("covid.sqlite"));

    load_states(&db, &[state("Washington", Vec::new())]).expect("first load should succeed");
    load_states(&db, &[state("Oregon", Vec::new())]).expect("second load should succeed");

    let listed = db.list_states().expect("list should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Oregon");
}
