//! Session high score history
//!
//! Held in memory only. Every finished run is appended; the list is seeded
//! with a zero so the best score is defined before the first run ends.

use serde::{Deserialize, Serialize};

/// Append-only history of finished run scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    runs: Vec<u64>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// History seeded with a single zero entry
    pub fn new() -> Self {
        Self { runs: vec![0] }
    }

    /// Append a finished run's score
    /// Returns true if it beats every earlier entry
    pub fn record(&mut self, score: u64) -> bool {
        let new_best = score > self.best();
        self.runs.push(score);
        new_best
    }

    /// Highest score recorded this session (0 before any run ends)
    pub fn best(&self) -> u64 {
        self.runs.iter().copied().max().unwrap_or(0)
    }

    /// All entries in insertion order, the seed included
    pub fn runs(&self) -> &[u64] {
        &self.runs
    }

    /// Number of entries, the seed included
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Never true: the seed entry is always present
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Top `n` finished runs, best first (the seed is not a run)
    pub fn top(&self, n: usize) -> Vec<u64> {
        let mut finished: Vec<u64> = self.runs.iter().skip(1).copied().collect();
        finished.sort_unstable_by(|a, b| b.cmp(a));
        finished.truncate(n);
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_zero() {
        let scores = HighScores::new();
        assert_eq!(scores.runs(), &[0]);
        assert_eq!(scores.best(), 0);
        assert!(!scores.is_empty());
        assert!(scores.top(3).is_empty());
    }

    #[test]
    fn test_record_tracks_best() {
        let mut scores = HighScores::new();
        assert!(scores.record(42));
        assert!(!scores.record(17));
        assert!(!scores.record(42));
        assert!(scores.record(90));
        assert_eq!(scores.best(), 90);
        assert_eq!(scores.runs(), &[0, 42, 17, 42, 90]);
    }

    #[test]
    fn test_zero_run_is_not_a_new_best() {
        let mut scores = HighScores::new();
        assert!(!scores.record(0));
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_top_sorted_descending() {
        let mut scores = HighScores::new();
        for s in [5, 30, 12, 30, 1] {
            scores.record(s);
        }
        assert_eq!(scores.top(3), vec![30, 30, 12]);
        assert_eq!(scores.top(10).len(), 5);
    }
}
