//! Editor state: buffer, cursor, undo log, and the dirty flag.
//!
//! All content mutation flows through the edit operations in `edit`; they are the only
//! code that touches buffer bytes after load. Cursor motion helpers here delegate to
//! `core_text::motion` and never mutate content.
//!
//! Core invariants (must hold after every public call):
//! * the buffer has at least one line;
//! * `cursor.line < line_count`;
//! * `cursor.column <= line_len(cursor.line)`.
//!
//! Undo model:
//! * Only single-character inserts and backspaces push records. A tab pushes four.
//! * New-line and delete-line are not recorded, so undo never restores line structure.
//! * `undo` pops one record and replays its inverse with recording disabled.
//!
//! Thread model: the state is owned by exactly one task; there is no interior
//! mutability and no locking.

use core_text::motion::{self, VerticalMotion};
use core_text::{Buffer, Position};
use std::path::PathBuf;

mod edit;
pub mod undo;
pub use edit::TAB_WIDTH;
pub use undo::{UndoAction, UndoLog, UndoRecord};

/// Top-level editor state container for a single document session.
pub struct EditorState {
    buffer: Buffer,
    cursor: Position,
    undo: UndoLog,
    pub file_name: Option<PathBuf>,
    /// Set by every mutation; cleared only by a successful save.
    pub dirty: bool,
}

impl EditorState {
    /// Create a new state over `buffer` with the cursor at the origin.
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            cursor: Position::origin(),
            undo: UndoLog::new(),
            file_name: None,
            dirty: false,
        }
    }

    pub fn with_file(buffer: Buffer, file_name: PathBuf) -> Self {
        let mut state = Self::new(buffer);
        state.file_name = Some(file_name);
        state
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Place the cursor, clamping it into the buffer.
    pub fn set_cursor(&mut self, mut pos: Position) {
        self.buffer.clamp(&mut pos);
        self.cursor = pos;
    }

    pub fn undo_log(&self) -> &UndoLog {
        &self.undo
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Byte immediately before the cursor (`None` at column 0).
    pub fn char_before_cursor(&self) -> Option<u8> {
        self.buffer.byte_before(self.cursor)
    }

    /// Replace the whole document (fresh session): cursor to origin, history dropped,
    /// dirty cleared.
    pub fn replace_buffer(&mut self, buffer: Buffer) {
        self.buffer = buffer;
        self.cursor = Position::origin();
        self.undo.clear();
        self.dirty = false;
    }

    /// Mark the document as saved.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whether the buffer/cursor invariant currently holds.
    pub fn invariants_hold(&self) -> bool {
        self.buffer.line_count() >= 1 && self.buffer.contains(self.cursor)
    }

    pub fn move_left(&mut self) {
        motion::left(&self.buffer, &mut self.cursor);
    }

    pub fn move_right(&mut self) {
        motion::right(&self.buffer, &mut self.cursor);
    }

    pub fn move_up(&mut self) -> VerticalMotion {
        motion::up(&self.buffer, &mut self.cursor)
    }

    pub fn move_down(&mut self) -> VerticalMotion {
        motion::down(&self.buffer, &mut self.cursor)
    }

    pub fn move_to_line_start(&mut self) {
        motion::line_start(&self.buffer, &mut self.cursor);
    }

    pub fn move_to_line_end(&mut self) {
        motion::line_end(&self.buffer, &mut self.cursor);
    }

    pub fn page_up(&mut self, lines: usize) {
        motion::page_up(&self.buffer, &mut self.cursor, lines);
    }

    pub fn page_down(&mut self, lines: usize) {
        motion::page_down(&self.buffer, &mut self.cursor, lines);
    }
}
