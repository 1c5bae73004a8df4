//! JSON file backend

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ScoreStore;
use crate::error::StoreError;

/// On-disk layout, keyed like the browser's LocalStorage entry
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(rename = "bestScore", default)]
    best_score: Option<u64>,
}

/// Best score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn best_score(&mut self) -> Result<Option<u64>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: ScoreFile = serde_json::from_str(&json)?;
        Ok(file.best_score)
    }

    fn set_best_score(&mut self, score_ms: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&ScoreFile {
            best_score: Some(score_ms),
        })?;
        // Replace atomically
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_no_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("scores.json"));
        assert_eq!(store.best_score().unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let mut store = JsonFileStore::new(&path);
        store.set_best_score(65432).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"bestScore":65432}"#);
        assert_eq!(JsonFileStore::new(&path).best_score().unwrap(), Some(65432));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{bestScore:").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.best_score(), Err(StoreError::Parse(_))));
    }
}
