//! Best score tracking
//!
//! The best score is read from the store lazily, at the end of the first run
//! that needs it, and written back only when beaten.

use crate::persistence::ScoreStore;

/// In-memory copy of the best score
#[derive(Debug, Clone, Default)]
pub struct BestScore {
    cached: Option<u64>,
}

impl BestScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached best score, if one has been loaded or set
    pub fn get(&self) -> Option<u64> {
        self.cached
    }

    /// Whether `score_ms` would replace the current best
    pub fn qualifies(&self, score_ms: u64) -> bool {
        self.cached.is_none_or(|best| score_ms > best)
    }

    /// Record a finished run's score.
    ///
    /// Loads from `store` while nothing is cached, then replaces and persists
    /// the best if there is none or `score_ms` beats it. Store failures are
    /// logged and otherwise ignored. Returns true on a new best.
    pub fn record<S: ScoreStore + ?Sized>(&mut self, score_ms: u64, store: &mut S) -> bool {
        if self.cached.is_none() {
            self.cached = match store.best_score() {
                Ok(best) => best,
                Err(e) => {
                    log::warn!("Could not load best score: {}", e);
                    None
                }
            };
        }

        if !self.qualifies(score_ms) {
            return false;
        }

        self.cached = Some(score_ms);
        if let Err(e) = store.set_best_score(score_ms) {
            log::warn!("Could not save best score: {}", e);
        }
        log::info!("New best score: {} ms", score_ms);
        true
    }
}
