//! Best-score persistence boundary
//!
//! The simulation reads one integer at startup and asks for a write when a
//! run beats it. How that integer is stored is up to the host:
//! - `MemoryScoreStore`: process-lifetime storage (tests, headless runs)
//! - `JsonFileScoreStore`: small JSON record written via tmp-then-rename

mod file;

pub use file::JsonFileScoreStore;

use thiserror::Error;

/// Errors from a score store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("score record is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Where the best score lives between sessions
pub trait ScoreStore {
    /// Read the stored best score (0 when nothing has been stored yet)
    fn load_best(&mut self) -> Result<u64, StoreError>;

    /// Persist a new best score
    fn save_best(&mut self, best: u64) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: u64,
    /// Number of successful writes
    pub writes: u32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best(best: u64) -> Self {
        Self { best, writes: 0 }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&mut self) -> Result<u64, StoreError> {
        Ok(self.best)
    }

    fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
        self.best = best;
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryScoreStore::with_best(120);
        assert_eq!(store.load_best().unwrap(), 120);
        store.save_best(300).unwrap();
        assert_eq!(store.load_best().unwrap(), 300);
        assert_eq!(store.writes, 1);
    }
}
