//! Terminal session setup for the editor: raw mode, alternate screen, hidden
//! hardware cursor (the renderer draws its own), and the window title.
//!
//! Where the terminal supports the kitty keyboard protocol, key event types are
//! requested so held keys arrive as repeats rather than fresh presses.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode, supports_keyboard_enhancement,
    },
};
use std::io::stdout;

/// Window title shown while editing `name`.
pub fn window_title(name: &str) -> String {
    format!("led - {name}")
}

/// Requested when supported: release/repeat reporting, and unambiguous
/// encodings so chords like Ctrl-0 reach the editor.
pub fn keyboard_enhancement_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
}

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current size as (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;
}

pub struct CrosstermBackend {
    entered: bool,
    keyboard_enhanced: bool,
}

/// RAII guard restoring the terminal even if the caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            entered: false,
            keyboard_enhanced: false,
        }
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Whether key event types were requested on enter.
    pub fn is_keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalGuard<'_> {
    pub fn backend(&mut self) -> &mut CrosstermBackend {
        self.backend
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.entered = true;
            // Probe failures just mean no enhancement.
            if supports_keyboard_enhancement().unwrap_or(false) {
                execute!(stdout(), PushKeyboardEnhancementFlags(keyboard_enhancement_flags()))?;
                self.keyboard_enhanced = true;
            }
            tracing::debug!(
                target: "terminal",
                keyboard_enhanced = self.keyboard_enhanced,
                "terminal_entered"
            );
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            if self.keyboard_enhanced {
                self.keyboard_enhanced = false;
                execute!(stdout(), PopKeyboardEnhancementFlags)?;
            }
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            tracing::debug!(target: "terminal", "terminal_left");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.leave() {
            tracing::warn!(target: "terminal", error = %e, "terminal_restore_failed");
        }
    }
}
