//! Runtime credentials
//!
//! The headlines API needs a static key. It is looked up in the
//! `NYT_API_KEY` environment variable first, then in a local key file kept
//! out of version control. Only the `serve` command needs it; the import
//! pipeline runs without credentials.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable consulted before the key file
pub const API_KEY_ENV: &str = "NYT_API_KEY";

/// Default key file, relative to the working directory
pub const DEFAULT_KEY_FILE: &str = "nyt_api_key.txt";

/// Errors that can occur while loading credentials
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the environment variable nor the key file provided a key
    #[error("NYT API key not found: set {API_KEY_ENV} or put the key in {}", .0.display())]
    MissingApiKey(PathBuf),

    /// The key file exists but could not be read
    #[error("failed to read key file {}: {source}", .path.display())]
    UnreadableKeyFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Loads the NYT API key from the environment or a key file.
///
/// `key_file` overrides the default file location. Whitespace around the
/// key is trimmed; an empty value counts as missing.
pub fn load_api_key(key_file: Option<&Path>) -> Result<String, ConfigError> {
    if let Ok(value) = std::env::var(API_KEY_ENV) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    let path = key_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILE));

    match fs::read_to_string(&path) {
        Ok(contents) => {
            let trimmed = contents.trim();
            if trimmed.is_empty() {
                Err(ConfigError::MissingApiKey(path))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigError::MissingApiKey(path))
        }
        Err(source) => Err(ConfigError::UnreadableKeyFile { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_key_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("key.txt");
        fs::write(&path, "  abc123\n").expect("write should succeed");

        let key = load_api_key(Some(&path)).expect("key file should load");
        assert_eq!(key, "abc123");
    }

    #[test]
    fn test_missing_key_file_is_missing_key() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("absent.txt");

        let result = load_api_key(Some(&path));
        assert!(matches!(result, Err(ConfigError::MissingApiKey(_))));
    }

    #[test]
    fn test_empty_key_file_is_missing_key() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, "   \n").expect("write should succeed");

        let result = load_api_key(Some(&path));
        assert!(matches!(result, Err(ConfigError::MissingApiKey(_))));
    }
}
