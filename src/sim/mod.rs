//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers arrive as tick inputs, never from a clock
//! - No rendering or platform dependencies

pub mod geometry;
pub mod obstacle;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;
pub mod timer;
pub mod view;

pub use geometry::Rect;
pub use obstacle::{Pipe, PipeKind, Spawner};
pub use player::{Player, PlayerState, RunFrame, Sprite};
pub use score::{Difficulty, Score};
pub use state::{Floor, GameEvent, GameState, RunState};
pub use tick::{TickInput, tick};
pub use timer::PeriodicTimer;
pub use view::FrameView;
