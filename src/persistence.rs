//! High score persistence
//!
//! The best score lives in a small JSON file that is read once at startup and
//! rewritten whenever it is beaten. A missing file means a best of zero.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// The best score seen so far, optionally backed by a file
#[derive(Debug)]
pub struct HighScoreStore {
    best: u32,
    path: Option<PathBuf>,
}

impl HighScoreStore {
    /// Read the stored best from `path`, defaulting to zero if absent
    pub fn load(path: &Path) -> Result<Self> {
        let best = if path.exists() {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read high score from {:?}", path))?;
            let record: HighScoreRecord = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse high score file {:?}", path))?;
            record.high_score
        } else {
            0
        };

        Ok(Self {
            best,
            path: Some(path.to_path_buf()),
        })
    }

    /// Load from `path`, logging and starting from zero if the file is unusable
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::error!("Error loading high score: {:#}", e);
            Self {
                best: 0,
                path: Some(path.to_path_buf()),
            }
        })
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            best: 0,
            path: None,
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record `score`, persisting it if it beats the current best
    ///
    /// Returns whether the score was a new best. The in-memory best is
    /// updated even if writing the file fails.
    pub fn record(&mut self, score: u32) -> Result<bool> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;

        if let Some(path) = &self.path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
            let json = serde_json::to_string(&HighScoreRecord { high_score: score })
                .context("Failed to serialize high score")?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write high score to {:?}", path))?;
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_defaults_to_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = HighScoreStore::load(&temp_dir.path().join("scores.json")).unwrap();
        assert_eq!(store.best(), 0);
    }

    #[test]
    fn test_record_persists_new_best() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("scores.json");

        let mut store = HighScoreStore::load(&path).unwrap();
        assert!(store.record(4).unwrap());
        assert!(!store.record(3).unwrap());
        assert!(!store.record(4).unwrap());
        assert_eq!(store.best(), 4);

        let reloaded = HighScoreStore::load(&path).unwrap();
        assert_eq!(reloaded.best(), 4);
    }

    #[test]
    fn test_lower_score_does_not_rewrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        std::fs::write(&path, r#"{"high_score": 9}"#).unwrap();

        let mut store = HighScoreStore::load(&path).unwrap();
        assert_eq!(store.best(), 9);
        assert!(!store.record(2).unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"high_score": 9}"#
        );
    }

    #[test]
    fn test_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(HighScoreStore::load(&path).is_err());
        let store = HighScoreStore::load_or_default(&path);
        assert_eq!(store.best(), 0);
        assert_eq!(store.path(), Some(path.as_path()));
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = HighScoreStore::in_memory();
        assert!(store.record(1).unwrap());
        assert_eq!(store.best(), 1);
        assert!(store.path().is_none());
    }
}
