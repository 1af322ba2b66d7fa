//! Terminal rendering of a `core_model::Frame`.
//!
//! The renderer is a pure consumer: it reads the frame snapshot once per tick and
//! never touches editor state. Work happens in two stages:
//!
//! 1. `compose` lays the frame out on a `Grid` of single-column cells: text rows
//!    from the first visible line, the cursor cell flagged `REVERSE`, and the HUD
//!    status row at the bottom flagged `HUD`.
//! 2. `RenderEngine` diffs the grid against the previously emitted one and
//!    repaints only changed rows through the batching `Writer`, using the colors
//!    of the selected palette.
//!
//! Document bytes are not decoded. Printable ASCII is drawn as-is and every other
//! byte as `?`, so one byte always occupies one cell and cursor columns line up
//! with screen columns.
//!
//! Invariants:
//! - `Grid::cells.len() == width * height`.
//! - At most one cell carries `CellFlags::CURSOR`.
//! - The HUD row (last row) is never part of the text area.

use bitflags::bitflags;

pub mod compose;
pub mod render_engine;
pub mod status;
pub mod style;
pub mod writer;

pub use compose::compose;
pub use render_engine::{RenderEngine, RenderStats};
pub use style::{Theme, ThemeSet};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellFlags: u8 {
        const REVERSE = 0b0000_0001; // reverse-video (software cursor)
        const CURSOR  = 0b0000_0010; // marks the cursor cell
        const HUD     = 0b0000_0100; // status row, drawn in HUD colors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            flags: CellFlags::empty(),
        }
    }
}

/// Map a document byte to the glyph shown for it.
#[inline]
pub fn display_char(byte: u8) -> char {
    if (b' '..=b'~').contains(&byte) {
        byte as char
    } else {
        '?'
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write `ch` at (x,y). Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, ch: char, flags: CellFlags) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell { ch, flags };
        }
    }

    /// Write `text` from column `x`, truncating at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, flags: CellFlags) {
        for (i, ch) in text.chars().enumerate() {
            let Some(col) = x.checked_add(i as u16).filter(|c| *c < self.width) else {
                break;
            };
            self.set(col, y, ch, flags);
        }
    }

    /// Add `flags` to every cell of row `y`.
    pub fn flag_row(&mut self, y: u16, flags: CellFlags) {
        for x in 0..self.width {
            if let Some(idx) = self.index(x, y) {
                self.cells[idx].flags |= flags;
            }
        }
    }

    pub fn apply_flags(&mut self, x: u16, y: u16, flags: CellFlags) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx].flags |= flags;
        }
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Row text with trailing blanks removed (testing / diagnostics).
    pub fn row_text(&self, y: u16) -> String {
        let s: String = self.row(y).iter().map(|c| c.ch).collect();
        s.trim_end().to_string()
    }

    /// Position of the cursor cell, if drawn.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        let idx = self
            .cells
            .iter()
            .position(|c| c.flags.contains(CellFlags::CURSOR))?;
        let w = self.width.max(1) as usize;
        Some(((idx % w) as u16, (idx / w) as u16))
    }
}
