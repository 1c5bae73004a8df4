//! Best score persistence
//!
//! Backends:
//! - [`MemoryStore`]: in-process only (tests, throwaway runs)
//! - [`JsonFileStore`]: `{"bestScore": <ms>}` in a JSON file

pub mod file;

pub use file::JsonFileStore;

use crate::error::StoreError;

/// Key-value access to the persisted best score (milliseconds)
pub trait ScoreStore {
    /// `Ok(None)` means no record yet
    fn best_score(&mut self) -> Result<Option<u64>, StoreError>;
    fn set_best_score(&mut self, score_ms: u64) -> Result<(), StoreError>;
}

/// Store that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u64>,
    /// Number of successful writes
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(score_ms: u64) -> Self {
        Self {
            best: Some(score_ms),
            writes: 0,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn best_score(&mut self) -> Result<Option<u64>, StoreError> {
        Ok(self.best)
    }

    fn set_best_score(&mut self, score_ms: u64) -> Result<(), StoreError> {
        self.best = Some(score_ms);
        self.writes += 1;
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn best_score(&mut self) -> Result<Option<u64>, StoreError> {
        (**self).best_score()
    }

    fn set_best_score(&mut self, score_ms: u64) -> Result<(), StoreError> {
        (**self).set_best_score(score_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.best_score().unwrap(), None);
        store.set_best_score(1234).unwrap();
        assert_eq!(store.best_score().unwrap(), Some(1234));
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryStore::with_best(10));
        assert_eq!(store.best_score().unwrap(), Some(10));
        store.set_best_score(20).unwrap();
        assert_eq!(store.best_score().unwrap(), Some(20));
    }
}
