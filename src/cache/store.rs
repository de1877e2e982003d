//! File-backed cache store
//!
//! Persists one JSON document per logical cache name, shaped as a flat
//! mapping from request fingerprint to the raw JSON response. Loading is
//! infallible by design (anything unreadable is an empty cache); saving
//! overwrites the whole file and surfaces errors, since a failed write
//! would leave disk state behind memory for every later run.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::Value;
use thiserror::Error;

/// The in-memory form of one named cache: fingerprint -> raw JSON response.
pub type CacheMap = serde_json::Map<String, Value>;

/// Errors that can occur when persisting a cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Writing the cache file failed (disk full, permission denied, ...)
    #[error("failed to write cache file: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the cache contents failed
    #[error("failed to serialize cache contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome of reading a cache file, kept distinct for observability even
/// though callers of [`CacheStore::open`] see both failure cases as empty.
enum CacheLoad {
    Loaded(CacheMap),
    Missing,
    Malformed(serde_json::Error),
}

/// Stores named caches as JSON files in a single directory
///
/// Defaults to an XDG-compliant cache directory (`~/.cache/covidash/` on
/// Linux); a custom directory can be supplied for tests or deployments
/// that keep cache files next to the database.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Creates a CacheStore using the XDG cache directory.
    ///
    /// Returns `None` if the platform cache directory cannot be determined
    /// (e.g. no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "covidash")?;
        Some(Self {
            cache_dir: project_dirs.cache_dir().to_path_buf(),
        })
    }

    /// Creates a CacheStore rooted at a custom directory.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path of the backing file for a named cache.
    ///
    /// The name is used verbatim (callers pass full file names such as
    /// `bing_cache.json`), matching the files produced by earlier runs.
    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(name)
    }

    fn load(&self, name: &str) -> CacheLoad {
        let contents = match fs::read_to_string(self.cache_path(name)) {
            Ok(contents) => contents,
            Err(_) => return CacheLoad::Missing,
        };
        match serde_json::from_str::<CacheMap>(&contents) {
            Ok(map) => CacheLoad::Loaded(map),
            Err(err) => CacheLoad::Malformed(err),
        }
    }

    /// Loads the persisted mapping for a named cache.
    ///
    /// Never fails: an absent file is a cold cache, and a malformed or
    /// unreadable file is treated the same way after logging what was
    /// found. Both cases return an empty mapping.
    pub fn open(&self, name: &str) -> CacheMap {
        match self.load(name) {
            CacheLoad::Loaded(map) => map,
            CacheLoad::Missing => {
                tracing::debug!(cache = name, "cache file absent, starting empty");
                CacheMap::new()
            }
            CacheLoad::Malformed(err) => {
                tracing::warn!(
                    cache = name,
                    error = %err,
                    "cache file is not valid JSON, starting empty"
                );
                CacheMap::new()
            }
        }
    }

    /// Serializes the full mapping and overwrites the backing file.
    ///
    /// This is a wholesale replace, not a merge: the file afterwards holds
    /// exactly `map`. Unlike [`CacheStore::open`], errors propagate.
    pub fn save(&self, name: &str, map: &CacheMap) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)?;
        let contents = serde_json::to_string(map)?;
        fs::write(self.cache_path(name), contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_open_missing_file_returns_empty_map() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.open("nonexistent.json").is_empty());
    }

    #[test]
    fn test_save_then_open_round_trips() {
        let (store, _temp_dir) = create_test_store();

        let mut map = CacheMap::new();
        map.insert(
            "https://x/y_a_1_b_2".to_string(),
            json!({"areas": [{"displayName": "Washington"}]}),
        );
        map.insert("https://x/y_".to_string(), json!([1, 2, 3]));

        store.save("test_cache.json", &map).expect("save should succeed");
        let reopened = store.open("test_cache.json");

        assert_eq!(reopened, map);
    }

    #[test]
    fn test_open_malformed_file_returns_empty_map() {
        let (store, temp_dir) = create_test_store();
        fs::write(temp_dir.path().join("broken.json"), "{ not json at all")
            .expect("write should succeed");

        assert!(store.open("broken.json").is_empty());
    }

    #[test]
    fn test_open_non_object_file_returns_empty_map() {
        let (store, temp_dir) = create_test_store();
        // Valid JSON, but not the expected mapping shape.
        fs::write(temp_dir.path().join("array.json"), "[1, 2, 3]")
            .expect("write should succeed");

        assert!(store.open("array.json").is_empty());
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let (store, _temp_dir) = create_test_store();

        let mut first = CacheMap::new();
        first.insert("old_key".to_string(), json!("old"));
        store.save("cache.json", &first).expect("save should succeed");

        let mut second = CacheMap::new();
        second.insert("new_key".to_string(), json!("new"));
        store.save("cache.json", &second).expect("save should succeed");

        let reopened = store.open("cache.json");
        assert!(reopened.get("old_key").is_none(), "save must replace, not merge");
        assert_eq!(reopened.get("new_key"), Some(&json!("new")));
    }

    #[test]
    fn test_save_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("caches");
        let store = CacheStore::with_dir(nested.clone());

        store.save("cache.json", &CacheMap::new()).expect("save should succeed");

        assert!(nested.join("cache.json").exists());
    }

    #[test]
    fn test_file_shape_is_flat_fingerprint_mapping() {
        let (store, temp_dir) = create_test_store();

        let mut map = CacheMap::new();
        map.insert("https://bing.com/covid/data_".to_string(), json!({"id": "World"}));
        store.save("bing_cache.json", &map).expect("save should succeed");

        let raw = fs::read_to_string(temp_dir.path().join("bing_cache.json"))
            .expect("file should exist");
        let parsed: Value = serde_json::from_str(&raw).expect("file should be JSON");
        assert_eq!(parsed["https://bing.com/covid/data_"]["id"], "World");
    }
}
