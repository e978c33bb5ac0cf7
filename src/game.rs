//! Fixed timestep driver
//!
//! Owns the simulation, the two periodic timers and the one-shot input edges
//! the host collects between ticks. Real elapsed time goes in, whole ticks
//! come out.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{FrameView, GameEvent, GameState, PeriodicTimer, TickInput, tick};
use crate::tuning::Tuning;

/// Input edges delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    JumpPressed,
    JumpReleased,
    Restart,
}

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    spawn_timer: PeriodicTimer,
    score_timer: PeriodicTimer,
    accumulator: f32,
    /// Edges latched since the last tick
    input: TickInput,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!(
            "New game: seed={} tick_rate={} spawn every {} ticks, score every {} ticks",
            seed,
            tuning.tick_rate,
            tuning.spawn_interval_ticks(),
            tuning.score_interval_ticks()
        );
        Self {
            spawn_timer: PeriodicTimer::new(tuning.spawn_interval_ticks()),
            score_timer: PeriodicTimer::new(tuning.score_interval_ticks()),
            state: GameState::new(seed, tuning),
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Latch an input edge for the next tick
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::JumpPressed => self.input.jump_pressed = true,
            InputEvent::JumpReleased => self.input.jump_released = true,
            InputEvent::Restart => self.input.restart = true,
        }
    }

    /// Run exactly one tick; returns the events it produced
    pub fn step(&mut self) -> &[GameEvent] {
        let mut input = std::mem::take(&mut self.input);
        input.spawn_due = self.spawn_timer.advance();
        input.score_due = self.score_timer.advance();
        tick(&mut self.state, &input);
        &self.state.events
    }

    /// Run as many ticks as `dt` seconds of real time cover
    /// Returns every event produced along the way
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let sim_dt = self.state.tuning.dt();
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= sim_dt && substeps < MAX_SUBSTEPS {
            events.extend_from_slice(self.step());
            self.accumulator -= sim_dt;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= sim_dt {
            log::trace!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        events
    }

    pub fn view(&self) -> FrameView {
        FrameView::capture(&self.state)
    }
}
