//! Periodic triggers counted in simulation ticks

use serde::{Deserialize, Serialize};

/// Fires once every `period` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicTimer {
    pub period: u32,
    elapsed: u32,
}

impl PeriodicTimer {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
        }
    }

    /// Count one tick; true on the tick the period completes
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_every_period() {
        let mut timer = PeriodicTimer::new(3);
        let fired: Vec<bool> = (0..9).map(|_| timer.advance()).collect();
        assert_eq!(
            fired,
            vec![false, false, true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn test_zero_period_fires_every_tick() {
        let mut timer = PeriodicTimer::new(0);
        assert!(timer.advance());
        assert!(timer.advance());
    }
}
