//! The runner: vertical physics, jump/bounce state machine, run animation

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::{GROUND_LEVEL, PLAYER_SIZE, PLAYER_X};
use crate::tuning::Tuning;

/// Runner state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// On the ground, animating the walk cycle
    Running,
    /// Airborne under gravity
    Jumping,
    /// Hit a pipe; physics frozen until restart
    Dead,
}

/// Walk cycle frames, in playback order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunFrame {
    Stride,
    Passing,
    Reach,
}

impl RunFrame {
    pub const CYCLE: [RunFrame; 3] = [RunFrame::Stride, RunFrame::Passing, RunFrame::Reach];

    /// Frame for a fractional animation position (wraps around the cycle)
    pub fn at(position: f32) -> Self {
        let index = position.max(0.0) as usize % Self::CYCLE.len();
        Self::CYCLE[index]
    }
}

/// Which sprite the renderer should draw for the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Run(RunFrame),
    Airborne,
    Dead,
}

/// What a physics step did to the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Touched down while the jump key was held and launched again
    Bounced,
    /// Touched down and went back to running
    Landed,
}

/// The player's runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top edge (screen space, grows downward)
    pub y: f32,
    /// Vertical velocity, negative is up
    pub vel: f32,
    pub state: PlayerState,
    /// Armed on jump press, disarmed on release
    pub bounce: bool,
    /// Fractional position in the walk cycle
    pub frame: f32,
    pub sprite: Sprite,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            y: GROUND_LEVEL,
            vel: 0.0,
            state: PlayerState::Running,
            bounce: false,
            frame: 0.0,
            sprite: Sprite::Run(RunFrame::Stride),
        }
    }
}

impl Player {
    pub fn is_alive(&self) -> bool {
        self.state != PlayerState::Dead
    }

    pub fn is_airborne(&self) -> bool {
        self.state == PlayerState::Jumping
    }

    /// Sprite bounds used for collision
    pub fn rect(&self) -> Rect {
        Rect::new(PLAYER_X, self.y, PLAYER_SIZE.x, PLAYER_SIZE.y)
    }

    /// Start a jump from the ground
    /// Returns false if the runner is airborne or dead
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.state != PlayerState::Running {
            return false;
        }
        self.state = PlayerState::Jumping;
        self.bounce = true;
        self.sprite = Sprite::Airborne;
        self.vel = -tuning.hop_impulse;
        true
    }

    /// Jump key let go: disarm bounce and pull down harder
    pub fn release(&mut self, tuning: &Tuning) {
        if !self.is_alive() {
            return;
        }
        self.bounce = false;
        if self.is_airborne() {
            self.vel += tuning.release_factor * tuning.gravity;
        }
    }

    /// Hit a pipe
    pub fn kill(&mut self) {
        self.state = PlayerState::Dead;
        self.sprite = Sprite::Dead;
    }

    /// Back on the ground for a new run
    pub fn respawn(&mut self) {
        *self = Self::default();
    }

    /// Advance one tick of gravity and animation
    pub fn update(&mut self, tuning: &Tuning) -> Option<Motion> {
        match self.state {
            PlayerState::Dead => None,
            PlayerState::Running => {
                self.run(tuning);
                None
            }
            PlayerState::Jumping => {
                self.vel += tuning.gravity;
                self.y += self.vel;

                if self.vel <= 0.0 || self.y < GROUND_LEVEL {
                    return None;
                }

                self.y = GROUND_LEVEL;
                if tuning.bounce && self.bounce {
                    self.vel = -tuning.hop_impulse;
                    self.sprite = Sprite::Airborne;
                    Some(Motion::Bounced)
                } else {
                    self.state = PlayerState::Running;
                    self.vel = 0.0;
                    self.frame = 0.0;
                    self.sprite = Sprite::Run(RunFrame::Stride);
                    Some(Motion::Landed)
                }
            }
        }
    }

    /// Grounded tick: pinned to the floor, walk cycle advances
    fn run(&mut self, tuning: &Tuning) {
        self.y = GROUND_LEVEL;
        self.vel = 0.0;

        self.frame += tuning.run_dampening;
        if self.frame >= RunFrame::CYCLE.len() as f32 {
            self.frame = 0.0;
        }
        self.sprite = Sprite::Run(RunFrame::at(self.frame));
    }
}
