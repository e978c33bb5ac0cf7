//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::player::Motion;
use super::state::{GameEvent, GameState};

/// Input and timer triggers for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key went down
    pub jump_pressed: bool,
    /// Jump key came up
    pub jump_released: bool,
    /// Start a new run (ignored while playing)
    pub restart: bool,
    /// Spawn timer fired
    pub spawn_due: bool,
    /// Score timer fired
    pub score_due: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    // Timers only count while a run is live
    if state.run.game_on {
        if input.spawn_due {
            if let Some(kind) = state
                .spawner
                .try_spawn(&mut state.rng, state.tuning.spawn_chance)
            {
                log::trace!("Spawned {:?} pipe ({} live)", kind, state.spawner.pipes.len());
                state.events.push(GameEvent::PipeSpawned { kind });
            }
        }

        if input.score_due && state.tuning.scoring {
            state.score.increase();
            if let Some(speed) = state
                .run
                .difficulty
                .on_score(state.score.current, &state.tuning)
            {
                log::debug!("Speed up to {} at {} points", speed, state.score.current);
                state.events.push(GameEvent::SpeedUp { speed });
            }
        }
    }

    if input.jump_pressed && state.player.jump(&state.tuning) {
        state.events.push(GameEvent::Jumped);
    }
    if input.restart && !state.run.game_on {
        state.restart();
    }
    if input.jump_released {
        state.player.release(&state.tuning);
    }

    if !state.run.game_on {
        return;
    }

    let speed = state.run.speed();
    state.floor.advance(speed);
    state.spawner.advance(speed);
    state.spawner.cull();

    if state.tuning.collisions && state.spawner.hit(&state.player.rect()).is_some() {
        state.game_over();
        return;
    }

    match state.player.update(&state.tuning) {
        Some(Motion::Bounced) => state.events.push(GameEvent::Bounced),
        Some(Motion::Landed) => state.events.push(GameEvent::Landed),
        None => {}
    }
}
