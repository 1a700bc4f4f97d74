//! Best-score store
//!
//! Persisted to LocalStorage on the web and to a JSON file natively.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score data is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Single best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "block_jump_warrior_highscore";

    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Keep `score` if it beats the best. Returns true on a new record.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Read from a JSON file; a missing file is an empty store
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let score: Self = serde_json::from_str(&json)?;
        log::info!("Loaded high score {}", score.best);
        Ok(score)
    }

    /// Write to a JSON file, replacing any previous contents
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::debug!("High score {} saved to {}", self.best, path.display());
        Ok(())
    }

    /// Load the high score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScore>(&json) {
                    Ok(score) => return score,
                    Err(e) => log::warn!("Discarding corrupt high score: {}", e),
                }
            }
        }
        Self::new()
    }

    /// Save the high score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_best() {
        let mut scores = HighScore::new();
        assert!(scores.record(30));
        assert!(!scores.record(20));
        assert!(!scores.record(30));
        assert_eq!(scores.best(), 30);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");

        assert_eq!(HighScore::load_from(&path).unwrap().best(), 0);

        let mut scores = HighScore::new();
        scores.record(120);
        scores.save_to(&path).unwrap();
        assert_eq!(HighScore::load_from(&path).unwrap(), scores);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(HighScore::load_from(&path), Err(StoreError::Json(_))));
    }
}
