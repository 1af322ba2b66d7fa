//! Terminal writer: an ordered queue of primitive terminal commands flushed once
//! per frame.
//!
//! Consecutive single-cell prints are batched into one `Print`; any move, color
//! or attribute change closes the current batch. `print_commands` counts the
//! `Print` commands actually queued, `cells_printed` the cells they cover, so
//! `print_commands <= cells_printed` always holds.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetColors},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    Colors { fg: Color, bg: Color },
    Reverse(bool),
    Print(String),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
    pending: String,
    pub print_commands: u64,
    pub cells_printed: u64,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let s = std::mem::take(&mut self.pending);
        self.cmds.push(Command::Print(s));
        self.print_commands += 1;
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.flush_pending();
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn colors(&mut self, fg: Color, bg: Color) {
        self.flush_pending();
        self.cmds.push(Command::Colors { fg, bg });
    }

    pub fn reverse(&mut self, on: bool) {
        self.flush_pending();
        self.cmds.push(Command::Reverse(on));
    }

    pub fn print_cell(&mut self, ch: char) {
        self.pending.push(ch);
        self.cells_printed += 1;
    }

    /// Queued commands with the pending batch closed (testing / diagnostics).
    pub fn commands(&mut self) -> &[Command] {
        self.flush_pending();
        &self.cmds
    }

    /// Emit everything to `out` and flush it.
    pub fn flush_to<W: Write>(mut self, out: &mut W) -> Result<(u64, u64)> {
        self.flush_pending();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::Colors { fg, bg } => {
                    queue!(out, SetColors(crossterm::style::Colors::new(fg, bg)))?
                }
                Command::Reverse(true) => queue!(out, SetAttribute(Attribute::Reverse))?,
                Command::Reverse(false) => queue!(out, SetAttribute(Attribute::NoReverse))?,
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        out.flush()?;
        Ok((self.print_commands, self.cells_printed))
    }
}
