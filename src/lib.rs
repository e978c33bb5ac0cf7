//! Pipe Runner - a side-scrolling pipe-jumping runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (runner physics, pipes, score, difficulty)
//! - `game`: Fixed timestep driver and periodic timers
//! - `renderer`: Terminal half-block rendering
//! - `platform`: Terminal keyboard input
//! - `tuning`: Data-driven game balance and tutorial stages

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Stage, Tuning};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Playfield dimensions (world units, y grows downward)
    pub const FIELD_WIDTH: f32 = 1024.0;
    pub const FIELD_HEIGHT: f32 = 512.0;
    /// Top of the floor strip; pipes stand on it
    pub const FLOOR_TOP: f32 = FIELD_HEIGHT - 64.0;

    /// Runner sprite size
    pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    /// Runner's fixed horizontal position (left edge)
    pub const PLAYER_X: f32 = 128.0;
    /// Runner's top edge while on the ground
    pub const GROUND_LEVEL: f32 = FLOOR_TOP - PLAYER_SIZE.y;

    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
