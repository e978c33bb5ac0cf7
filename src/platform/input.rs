//! Keyboard input
//!
//! Terminals with the keyboard enhancement protocol report real key
//! releases. Classic terminals only send presses (auto-repeat shows up as
//! more presses), so a jump key counts as released once no press or repeat
//! has arrived for [`HOLD_WINDOW`].

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::InputEvent;

/// How long a jump key stays held without a fresh press or repeat
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// What the host should do with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(InputEvent),
    ToggleMute,
    Quit,
}

fn is_jump_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w'))
}

/// Turns raw key events into game input edges
#[derive(Debug)]
pub struct KeyTracker {
    /// Terminal reports key releases
    enhanced: bool,
    /// Last time a jump key was seen pressed or repeating
    jump_seen: Option<Instant>,
}

impl KeyTracker {
    pub fn new(enhanced: bool) -> Self {
        Self {
            enhanced,
            jump_seen: None,
        }
    }

    /// Translate one key event; `game_on` decides whether the jump key restarts
    pub fn handle(&mut self, key: KeyEvent, game_on: bool, now: Instant) -> Option<Command> {
        if key.kind == KeyEventKind::Press {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Some(Command::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Some(Command::Quit);
                }
                KeyCode::Char('m') => return Some(Command::ToggleMute),
                KeyCode::Enter | KeyCode::Char('r') if !game_on => {
                    return Some(Command::Game(InputEvent::Restart));
                }
                _ => {}
            }
        }

        if !is_jump_key(key.code) {
            return None;
        }

        match key.kind {
            KeyEventKind::Press => {
                let already_held = self.jump_seen.replace(now).is_some();
                if already_held {
                    // Classic terminal auto-repeat; a key held through the
                    // crash must be let go before it restarts
                    None
                } else if !game_on {
                    Some(Command::Game(InputEvent::Restart))
                } else {
                    Some(Command::Game(InputEvent::JumpPressed))
                }
            }
            KeyEventKind::Repeat => {
                self.jump_seen = Some(now);
                None
            }
            KeyEventKind::Release => self
                .jump_seen
                .take()
                .map(|_| Command::Game(InputEvent::JumpReleased)),
        }
    }

    /// Synthesize the release a classic terminal never sends
    pub fn expire(&mut self, now: Instant) -> Option<Command> {
        if self.enhanced {
            return None;
        }
        let seen = self.jump_seen?;
        if now.saturating_duration_since(seen) > HOLD_WINDOW {
            self.jump_seen = None;
            Some(Command::Game(InputEvent::JumpReleased))
        } else {
            None
        }
    }
}
