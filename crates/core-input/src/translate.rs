//! Key → `EditCommand` decoding.
//!
//! Bindings:
//! * printable ASCII inserts; Enter, Backspace, Tab, arrows, PageUp/PageDown,
//!   Home/End map to their commands;
//! * `Ctrl-Q`/`Ctrl-C` quit, `Ctrl-D` delete line, `Ctrl-S` save, `Ctrl-Z` undo,
//!   `Ctrl-K`/`Ctrl-J` zoom in/out, `Ctrl-0`/`Ctrl-E` line start/end
//!   (`Ctrl-0` only arrives on terminals with the enhanced keyboard protocol;
//!   Home works everywhere);
//! * `Ctrl-T` arms a theme prefix; the next key `1`..`9` selects palette
//!   `digit - 1`. Any other key cancels the prefix and is decoded normally.

use core_events::{EditCommand, InputEvent, KEYPRESS_THROTTLED, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::Ordering;
use tracing::trace;

#[derive(Debug, Default)]
pub struct KeyTranslator {
    theme_pending: bool,
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme_pending(&self) -> bool {
        self.theme_pending
    }

    pub fn translate(&mut self, key: &KeyEvent) -> Option<EditCommand> {
        if std::mem::take(&mut self.theme_pending) {
            if let KeyCode::Char(d @ '1'..='9') = key.code {
                let idx = d as usize - '1' as usize;
                trace!(target: "input.translate", idx, "theme_prefix_digit");
                return Some(EditCommand::SwitchTheme(idx));
            }
            trace!(target: "input.translate", "theme_prefix_cancelled");
        }

        if key.mods.contains(KeyModifiers::ALT) {
            return None;
        }

        if key.mods.contains(KeyModifiers::CTRL) {
            let KeyCode::Char(c) = key.code else {
                return None;
            };
            return match c.to_ascii_lowercase() {
                'q' | 'c' => Some(EditCommand::Quit),
                'd' => Some(EditCommand::DeleteLine),
                's' => Some(EditCommand::Save),
                'z' => Some(EditCommand::Undo),
                'k' => Some(EditCommand::ZoomIn),
                'j' => Some(EditCommand::ZoomOut),
                '0' => Some(EditCommand::MoveToLineStart),
                'e' => Some(EditCommand::MoveToLineEnd),
                't' => {
                    self.theme_pending = true;
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c @ ' '..='~') => Some(EditCommand::InsertChar(c as u8)),
            KeyCode::Char(_) | KeyCode::Esc => None,
            KeyCode::Enter => Some(EditCommand::Enter),
            KeyCode::Backspace => Some(EditCommand::DeleteBack),
            KeyCode::Tab => Some(EditCommand::Tab),
            KeyCode::Up => Some(EditCommand::MoveUp),
            KeyCode::Down => Some(EditCommand::MoveDown),
            KeyCode::Left => Some(EditCommand::MoveLeft),
            KeyCode::Right => Some(EditCommand::MoveRight),
            KeyCode::Home => Some(EditCommand::MoveToLineStart),
            KeyCode::End => Some(EditCommand::MoveToLineEnd),
            KeyCode::PageUp => Some(EditCommand::PageUp),
            KeyCode::PageDown => Some(EditCommand::PageDown),
        }
    }
}

/// Passes one of every `cooldown` auto-repeated events for repeatable commands.
/// A fresh press always passes and restarts the count.
#[derive(Debug)]
pub struct RepeatThrottle {
    cooldown: u32,
    repeats: u32,
}

impl RepeatThrottle {
    pub fn new(cooldown: u32) -> Self {
        Self {
            cooldown: cooldown.max(1),
            repeats: 0,
        }
    }

    pub fn admit(&mut self, cmd: &EditCommand, repeat: bool) -> bool {
        if !cmd.is_repeatable() {
            return true;
        }
        if !repeat {
            self.repeats = 0;
            return true;
        }
        self.repeats = self.repeats.wrapping_add(1);
        let pass = self.repeats % self.cooldown == 0;
        if !pass {
            KEYPRESS_THROTTLED.fetch_add(1, Ordering::Relaxed);
        }
        pass
    }
}

/// Full input decoding stage: translation followed by repeat throttling.
#[derive(Debug)]
pub struct InputDecoder {
    translator: KeyTranslator,
    throttle: RepeatThrottle,
}

impl InputDecoder {
    pub fn new(repeat_cooldown: u32) -> Self {
        Self {
            translator: KeyTranslator::new(),
            throttle: RepeatThrottle::new(repeat_cooldown),
        }
    }

    /// Resize events carry no command; the runtime handles them directly.
    pub fn decode(&mut self, event: &InputEvent) -> Option<EditCommand> {
        match event {
            InputEvent::CtrlC => Some(EditCommand::Quit),
            InputEvent::Resize(..) => None,
            InputEvent::Key(key) => {
                let cmd = self.translator.translate(key)?;
                if self.throttle.admit(&cmd, key.repeat) {
                    Some(cmd)
                } else {
                    trace!(target: "input.translate", ?cmd, "repeat_throttled");
                    None
                }
            }
        }
    }
}
