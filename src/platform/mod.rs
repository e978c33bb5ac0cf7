//! Platform abstraction layer
//!
//! Handles the terminal host:
//! - Raw mode / alternate screen setup and teardown
//! - Keyboard enhancement (real key releases) when the terminal supports it
//! - Input events (see [`input`])

pub mod input;

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};

pub use input::{Command, KeyTracker};

/// Terminal in game mode; restored on drop
pub struct TerminalSession<W: Write> {
    out: W,
    /// Key release events were granted
    pub enhanced: bool,
}

impl<W: Write> TerminalSession<W> {
    pub fn enter(mut out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && execute!(
                out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                )
            )
            .is_ok();
        log::info!(
            "Terminal ready ({} key releases)",
            if enhanced { "real" } else { "timed" }
        );

        Ok(Self { out, enhanced })
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}
