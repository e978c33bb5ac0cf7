//! Game state and core simulation types
//!
//! Everything a run needs to resume deterministically lives here, RNG included.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{PipeKind, Spawner};
use super::player::Player;
use super::score::{Difficulty, Score};
use crate::consts::FIELD_WIDTH;
use crate::tuning::Tuning;

/// Per-run flags shared by every component during a tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// False while the game-over overlay is up
    pub game_on: bool,
    pub difficulty: Difficulty,
}

impl RunState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            game_on: true,
            difficulty: Difficulty::new(tuning),
        }
    }

    pub fn speed(&self) -> i32 {
        self.difficulty.speed
    }
}

/// Scrolling floor; two copies are drawn side by side
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Floor {
    /// Horizontal offset in `(-FIELD_WIDTH, 0]`
    pub offset: f32,
}

impl Floor {
    pub fn advance(&mut self, speed: i32) {
        self.offset -= speed as f32;
        if self.offset <= -FIELD_WIDTH {
            self.offset = 0.0;
        }
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Bounced,
    Landed,
    PipeSpawned { kind: PipeKind },
    SpeedUp { speed: i32 },
    Crashed { score: u64 },
    /// The finished run went into the history
    ScoreCaptured { score: u64, new_best: bool },
    Restarted,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG driving spawn coin flips and pipe variants
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub run: RunState,
    pub player: Player,
    pub spawner: Spawner,
    pub score: Score,
    pub floor: Floor,
    /// Events produced by the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            run: RunState::new(&tuning),
            tuning,
            time_ticks: 0,
            player: Player::default(),
            spawner: Spawner::default(),
            score: Score::default(),
            floor: Floor::default(),
            events: Vec::new(),
        }
    }

    pub fn game_on(&self) -> bool {
        self.run.game_on
    }

    /// End the run: freeze the runner, clear the field, record the score
    pub fn game_over(&mut self) {
        let score = self.score.current;
        self.player.kill();
        self.run.game_on = false;
        let removed = self.spawner.clear();
        self.events.push(GameEvent::Crashed { score });
        log::info!("Game over at {} points ({} pipes cleared)", score, removed);

        if let Some(capture) = self.score.capture() {
            self.events.push(GameEvent::ScoreCaptured {
                score: capture.score,
                new_best: capture.new_best,
            });
        }
    }

    /// Start a new run after a game over
    pub fn restart(&mut self) {
        self.run.game_on = true;
        self.run.difficulty.reset(&self.tuning);
        self.score.rearm();
        self.player.respawn();
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted (best so far: {})", self.score.best());
    }
}
