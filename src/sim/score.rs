//! Score counter and scroll speed ramp

use serde::{Deserialize, Serialize};

use crate::highscores::HighScores;
use crate::tuning::Tuning;

/// Running score plus the session history it feeds into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub current: u64,
    pub history: HighScores,
    /// Cleared once the current run has been written to `history`
    pub capture_pending: bool,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            current: 0,
            history: HighScores::new(),
            capture_pending: true,
        }
    }
}

/// Result of writing a finished run into the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub score: u64,
    pub new_best: bool,
}

impl Score {
    /// Score timer fired
    pub fn increase(&mut self) {
        self.current += 1;
    }

    /// Move the current run into the history, at most once per run
    pub fn capture(&mut self) -> Option<Capture> {
        if !self.capture_pending {
            return None;
        }
        let score = self.current;
        let new_best = self.history.record(score);
        self.current = 0;
        self.capture_pending = false;
        Some(Capture { score, new_best })
    }

    /// New run started: allow the next capture
    pub fn rearm(&mut self) {
        self.capture_pending = true;
    }

    pub fn best(&self) -> u64 {
        self.history.best()
    }
}

/// Scroll speed for the current run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difficulty {
    pub speed: i32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.base_speed,
        }
    }

    /// Step the speed up if `score` sits exactly on a threshold
    /// Returns the new speed when it changed
    pub fn on_score(&mut self, score: u64, tuning: &Tuning) -> Option<i32> {
        if !tuning.difficulty {
            return None;
        }
        let hits = tuning
            .speed_thresholds
            .iter()
            .filter(|&&t| t == score)
            .count() as i32;
        if hits == 0 {
            return None;
        }
        self.speed += tuning.speed_step * hits;
        Some(self.speed)
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        self.speed = tuning.base_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_capture_once_per_run() {
        let mut score = Score::default();
        for _ in 0..37 {
            score.increase();
        }
        let capture = score.capture();
        assert_eq!(
            capture,
            Some(Capture {
                score: 37,
                new_best: true
            })
        );
        assert_eq!(score.current, 0);
        assert_eq!(score.capture(), None);
        assert_eq!(score.history.runs(), &[0, 37]);

        score.rearm();
        score.increase();
        assert_eq!(
            score.capture(),
            Some(Capture {
                score: 1,
                new_best: false
            })
        );
        assert_eq!(score.best(), 37);
    }

    #[test]
    fn test_speed_steps_at_thresholds() {
        let tuning = Tuning::default();
        let mut difficulty = Difficulty::new(&tuning);
        assert_eq!(difficulty.speed, 9);

        assert_eq!(difficulty.on_score(99, &tuning), None);
        assert_eq!(difficulty.on_score(100, &tuning), Some(10));
        assert_eq!(difficulty.on_score(101, &tuning), None);
        assert_eq!(difficulty.on_score(500, &tuning), Some(11));
        assert_eq!(difficulty.on_score(1000, &tuning), Some(12));
        assert_eq!(difficulty.on_score(5000, &tuning), None);

        difficulty.reset(&tuning);
        assert_eq!(difficulty.speed, 9);
    }

    #[test]
    fn test_speed_fixed_without_difficulty_stage() {
        let tuning = Tuning::from_stage(crate::tuning::Stage::SoundAndScore);
        let mut difficulty = Difficulty::new(&tuning);
        assert_eq!(difficulty.on_score(100, &tuning), None);
        assert_eq!(difficulty.speed, tuning.base_speed);
    }

    proptest! {
        #[test]
        fn prop_capture_once(points in 0u64..500, extra in 1usize..50) {
            let mut score = Score::default();
            for _ in 0..points {
                score.increase();
            }
            let before = score.history.len();
            let mut captures = 0;
            for _ in 0..extra {
                if let Some(c) = score.capture() {
                    prop_assert_eq!(c.score, points);
                    captures += 1;
                }
            }
            prop_assert_eq!(captures, 1);
            prop_assert_eq!(score.history.len(), before + 1);
            prop_assert_eq!(score.history.runs().last().copied(), Some(points));
        }

        #[test]
        fn prop_speed_non_decreasing(ticks in 1u64..1500) {
            let tuning = Tuning::default();
            let mut difficulty = Difficulty::new(&tuning);
            let mut last = difficulty.speed;
            for score in 1..=ticks {
                difficulty.on_score(score, &tuning);
                prop_assert!(difficulty.speed >= last);
                last = difficulty.speed;
            }
            difficulty.reset(&tuning);
            prop_assert_eq!(difficulty.speed, tuning.base_speed);
        }
    }
}
