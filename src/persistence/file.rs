//! JSON file score store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ScoreStore, StoreError};

/// On-disk record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BestRecord {
    best: u64,
}

/// Stores `{ "best": n }` at a fixed path
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load_best(&mut self) -> Result<u64, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let record: BestRecord = serde_json::from_str(&json)?;
        log::info!("Loaded best score {}", record.best);
        Ok(record.best)
    }

    fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&BestRecord { best })?;
        // Write beside the target, then swap in, so a crash never leaves a torn file
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score saved ({})", best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileScoreStore::new(dir.path().join("best.json"));
        assert_eq!(store.load_best().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        let mut store = JsonFileScoreStore::new(&path);
        store.save_best(1230).unwrap();
        assert!(!store.tmp_path().exists());

        let mut reopened = JsonFileScoreStore::new(&path);
        assert_eq!(reopened.load_best().unwrap(), 1230);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "garbage").unwrap();
        let mut store = JsonFileScoreStore::new(&path);
        assert!(matches!(store.load_best(), Err(StoreError::Format(_))));
    }
}
