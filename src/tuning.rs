//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The five tutorial stages are
//! exposed as [`Stage`] presets that switch features on one at a time.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tutorial stage presets, each one adding a feature to the previous
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Stage {
    /// Pipes scroll by but nothing can hit the runner
    GameOff,
    /// Collisions end the run, jump key restarts
    GameOn,
    /// Holding the jump key chains jumps
    Bounce,
    /// Sound cues and the score counter
    SoundAndScore,
    /// Scroll speed ramps up at score thresholds
    #[default]
    Difficulty,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::GameOff,
        Stage::GameOn,
        Stage::Bounce,
        Stage::SoundAndScore,
        Stage::Difficulty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::GameOff => "game-off",
            Stage::GameOn => "game-on",
            Stage::Bounce => "bounce",
            Stage::SoundAndScore => "sound-and-score",
            Stage::Difficulty => "difficulty",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1" | "game-off" | "gameoff" => Some(Stage::GameOff),
            "2" | "game-on" | "gameon" => Some(Stage::GameOn),
            "3" | "bounce" => Some(Stage::Bounce),
            "5" | "sound-and-score" | "score" => Some(Stage::SoundAndScore),
            "6" | "difficulty" => Some(Stage::Difficulty),
            _ => None,
        }
    }

    /// Simulation ticks per second
    pub fn tick_rate(&self) -> u32 {
        match self {
            Stage::GameOff | Stage::GameOn | Stage::Bounce => 60,
            Stage::SoundAndScore | Stage::Difficulty => 120,
        }
    }

    pub fn collisions(&self) -> bool {
        *self != Stage::GameOff
    }

    pub fn bounce(&self) -> bool {
        matches!(
            self,
            Stage::Bounce | Stage::SoundAndScore | Stage::Difficulty
        )
    }

    pub fn sound(&self) -> bool {
        matches!(self, Stage::SoundAndScore | Stage::Difficulty)
    }

    pub fn scoring(&self) -> bool {
        matches!(self, Stage::SoundAndScore | Stage::Difficulty)
    }

    pub fn difficulty(&self) -> bool {
        *self == Stage::Difficulty
    }
}

/// Gameplay constants and feature switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation ticks per second
    pub tick_rate: u32,

    // === Runner physics (world units per tick) ===
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Upward velocity set by a jump
    pub hop_impulse: f32,
    /// Releasing jump adds `release_factor * gravity` to velocity
    pub release_factor: f32,
    /// Run animation frames advanced per tick
    pub run_dampening: f32,

    // === Scrolling ===
    /// Scroll speed at the start of every run
    pub base_speed: i32,
    /// Added to the scroll speed at each threshold
    pub speed_step: i32,
    /// Scores at which the scroll speed steps up
    pub speed_thresholds: Vec<u64>,

    // === Timers ===
    /// Period of the pipe spawn attempt
    pub spawn_interval_ms: u32,
    /// Period of the score increment
    pub score_interval_ms: u32,
    /// Probability that a spawn attempt produces a pipe
    pub spawn_chance: f64,

    // === Feature switches ===
    pub collisions: bool,
    pub bounce: bool,
    pub sound: bool,
    pub scoring: bool,
    pub difficulty: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_stage(Stage::default())
    }
}

impl Tuning {
    /// Baseline constants with the feature switches of `stage`
    pub fn from_stage(stage: Stage) -> Self {
        Self {
            tick_rate: stage.tick_rate(),
            gravity: 0.6,
            hop_impulse: 10.0,
            release_factor: 5.0,
            run_dampening: 0.25,
            base_speed: 9,
            speed_step: 1,
            speed_thresholds: vec![100, 500, 1000],
            spawn_interval_ms: 700,
            score_interval_ms: 100,
            spawn_chance: 0.5,
            collisions: stage.collisions(),
            bounce: stage.bounce(),
            sound: stage.sound(),
            scoring: stage.scoring(),
            difficulty: stage.difficulty(),
        }
    }

    /// Convert a period in milliseconds to whole ticks (at least one)
    pub fn ticks_for_ms(&self, ms: u32) -> u32 {
        let ticks = (u64::from(ms) * u64::from(self.tick_rate) + 500) / 1000;
        ticks.clamp(1, u64::from(u32::MAX)) as u32
    }

    pub fn spawn_interval_ticks(&self) -> u32 {
        self.ticks_for_ms(self.spawn_interval_ms)
    }

    pub fn score_interval_ticks(&self) -> u32 {
        self.ticks_for_ms(self.score_interval_ms)
    }

    /// Fixed timestep in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Apply a JSON object of overrides; fields it omits keep their value in `self`
    pub fn with_overrides(&self, json: &str) -> Result<Self, serde_json::Error> {
        let overrides: serde_json::Map<String, Value> = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        serde_json::from_value(merged)
    }

    /// Apply the overrides file at `path` to `base`; `base` unchanged on any failure
    pub fn load_from(path: &Path, base: Tuning) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match base.with_overrides(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning {}: {}", path.display(), e);
                    base
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning {}: {}", path.display(), e);
                base
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_features_accumulate() {
        let off = Tuning::from_stage(Stage::GameOff);
        assert!(!off.collisions && !off.bounce && !off.scoring);
        assert_eq!(off.tick_rate, 60);

        let bounce = Tuning::from_stage(Stage::Bounce);
        assert!(bounce.collisions && bounce.bounce && !bounce.sound);

        let full = Tuning::default();
        assert!(full.collisions && full.bounce && full.sound && full.scoring && full.difficulty);
        assert_eq!(full.tick_rate, 120);
    }

    #[test]
    fn test_stage_names_parse_back() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_str(stage.as_str()), Some(stage));
        }
        assert_eq!(Stage::from_str("BOUNCE"), Some(Stage::Bounce));
        assert_eq!(Stage::from_str("4"), None);
    }

    #[test]
    fn test_timer_periods_in_ticks() {
        let t = Tuning::default();
        assert_eq!(t.spawn_interval_ticks(), 84);
        assert_eq!(t.score_interval_ticks(), 12);

        let slow = Tuning::from_stage(Stage::GameOn);
        assert_eq!(slow.spawn_interval_ticks(), 42);
        assert_eq!(slow.score_interval_ticks(), 6);

        let tiny = Tuning {
            score_interval_ms: 1,
            ..Tuning::default()
        };
        assert_eq!(tiny.score_interval_ticks(), 1);
    }

    #[test]
    fn test_overrides_keep_base_values() {
        let base = Tuning::from_stage(Stage::GameOff);
        let t = base
            .with_overrides(r#"{ "gravity": 0.8, "speed_thresholds": [50] }"#)
            .expect("valid json");
        assert_eq!(t.gravity, 0.8);
        assert_eq!(t.speed_thresholds, vec![50]);
        assert_eq!(t.hop_impulse, 10.0);
        // Stage switches survive a partial file
        assert_eq!(t.tick_rate, 60);
        assert!(!t.collisions && !t.scoring && !t.difficulty);
    }

    #[test]
    fn test_overrides_reject_bad_types() {
        let base = Tuning::default();
        assert!(base.with_overrides(r#"{ "gravity": "heavy" }"#).is_err());
        assert!(base.with_overrides("[1, 2]").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let fallback = Tuning::from_stage(Stage::Bounce);
        let t = Tuning::load_from(Path::new("/nonexistent/tuning.json"), fallback.clone());
        assert_eq!(t, fallback);
    }
}
