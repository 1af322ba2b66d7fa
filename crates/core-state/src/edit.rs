//! Character and line level mutation.
//!
//! Each operation is atomic with respect to buffer + cursor and sets the dirty flag
//! when it changes content. Character operations take a `record` flag; undo replay
//! passes `false` so history does not grow while it is being consumed.

use crate::EditorState;
use crate::undo::{UndoAction, UndoRecord};
use core_text::{Position, motion};
use tracing::trace;

/// Number of spaces a tab expands to.
pub const TAB_WIDTH: usize = 4;

impl EditorState {
    /// Insert `c` at the cursor and advance the cursor by one.
    pub fn insert_char(&mut self, c: u8, record: bool) {
        let before = self.cursor;
        self.buffer.insert_byte(&mut self.cursor, c);
        if record {
            self.undo.push(UndoRecord::delete_char(
                self.cursor.line,
                self.cursor.column,
                c,
            ));
        }
        self.dirty = true;
        trace!(target: "state.edit", op = "insert_char", byte = c, line = before.line, column = before.column, record, "edit");
    }

    /// Backspace. No-op at column 0; returns whether a byte was removed.
    pub fn delete_char_before_cursor(&mut self, record: bool) -> bool {
        let before = self.cursor;
        let Some(removed) = self.buffer.delete_byte_before(&mut self.cursor) else {
            return false;
        };
        if record {
            self.undo
                .push(UndoRecord::reinsert_char(before.line, before.column, removed));
        }
        self.dirty = true;
        trace!(target: "state.edit", op = "delete_char_before", byte = removed, line = before.line, column = before.column, record, "edit");
        true
    }

    /// Open a new empty line below the current one and move the cursor to its start.
    ///
    /// The text after the cursor stays on the current line; nothing moves to the new
    /// line. Not recorded in the undo log.
    pub fn split_line_at_cursor(&mut self) {
        let line = self.cursor.line + 1;
        self.buffer.insert_line(line, Vec::new());
        self.cursor = Position::new(line, 0);
        self.dirty = true;
        trace!(target: "state.edit", op = "split_line", line, "edit");
    }

    /// Delete the current line. The only line is cleared instead; otherwise the cursor
    /// moves to the previous line (staying at 0 when already on the first). Column
    /// resets to 0. Not recorded in the undo log.
    pub fn delete_current_line(&mut self) {
        let line = self.cursor.line;
        let removed = self.buffer.delete_line(line);
        let new_line = if removed { line.saturating_sub(1) } else { line };
        self.set_cursor(Position::new(new_line, 0));
        self.dirty = true;
        trace!(target: "state.edit", op = "delete_line", line, removed, to_line = self.cursor.line, "edit");
    }

    /// Insert `TAB_WIDTH` spaces, each recorded separately.
    pub fn insert_tab(&mut self) {
        for _ in 0..TAB_WIDTH {
            self.insert_char(b' ', true);
        }
    }

    /// Pop and replay the most recent undo record. Returns the replayed record, or `None`
    /// when the log is empty (no state change).
    pub fn undo(&mut self) -> Option<UndoRecord> {
        let record = self.undo.pop()?;
        // The edited byte sits just before the recorded column.
        self.set_cursor(Position::new(
            record.line,
            record.column.saturating_sub(1),
        ));
        match record.action {
            UndoAction::DeleteChar => {
                motion::right(&self.buffer, &mut self.cursor);
                self.delete_char_before_cursor(false);
            }
            UndoAction::ReinsertChar => self.insert_char(record.ch, false),
        }
        trace!(target: "state.undo", action = ?record.action, line = self.cursor.line, column = self.cursor.column, remaining = self.undo.len(), "undo_replayed");
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use crate::EditorState;
    use crate::undo::UndoAction;
    use core_text::{Buffer, Position};
    use pretty_assertions::assert_eq;

    fn lines(st: &EditorState) -> Vec<String> {
        st.buffer()
            .lines()
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect()
    }

    fn state_at(content: &str, cursor: Position) -> EditorState {
        let mut st = EditorState::new(Buffer::from_str("t", content));
        st.set_cursor(cursor);
        st
    }

    #[test]
    fn insert_char_records_delete_at_resulting_column() {
        let mut st = state_at("ac", Position::new(0, 1));
        st.insert_char(b'b', true);
        assert_eq!(lines(&st), vec!["abc"]);
        assert_eq!(st.cursor(), Position::new(0, 2));
        let rec = st.undo_log().peek().copied().unwrap();
        assert_eq!(rec.action, UndoAction::DeleteChar);
        assert_eq!((rec.line, rec.column, rec.ch), (0, 2, b'b'));
        assert!(st.dirty);
    }

    #[test]
    fn insert_char_unrecorded_leaves_log() {
        let mut st = state_at("", Position::origin());
        st.insert_char(b'z', false);
        assert_eq!(lines(&st), vec!["z"]);
        assert_eq!(st.undo_depth(), 0);
    }

    #[test]
    fn delete_before_records_reinsert_at_pre_decrement_column() {
        let mut st = state_at("abc", Position::new(0, 3));
        assert!(st.delete_char_before_cursor(true));
        assert_eq!(lines(&st), vec!["ab"]);
        assert_eq!(st.cursor(), Position::new(0, 2));
        let rec = st.undo_log().peek().copied().unwrap();
        assert_eq!(rec.action, UndoAction::ReinsertChar);
        assert_eq!((rec.line, rec.column, rec.ch), (0, 3, b'c'));
    }

    #[test]
    fn delete_before_at_column_zero_is_noop() {
        let mut st = state_at("abc", Position::origin());
        assert!(!st.delete_char_before_cursor(true));
        assert_eq!(lines(&st), vec!["abc"]);
        assert_eq!(st.undo_depth(), 0);
        assert!(!st.dirty, "no mutation, no dirty flag");
    }

    #[test]
    fn insert_then_delete_round_trips() {
        let mut st = state_at("hello", Position::new(0, 2));
        st.insert_char(b'X', true);
        st.delete_char_before_cursor(true);
        assert_eq!(lines(&st), vec!["hello"]);
        assert_eq!(st.cursor(), Position::new(0, 2));
    }

    // Current behaviour, possibly unintended: the tail after the cursor is not carried
    // to the new line.
    #[test]
    fn split_line_leaves_tail_on_current_line() {
        let mut st = state_at("abcdef", Position::new(0, 3));
        st.split_line_at_cursor();
        assert_eq!(lines(&st), vec!["abcdef", ""]);
        assert_eq!(st.cursor(), Position::new(1, 0));
        assert_eq!(st.undo_depth(), 0);
        assert!(st.dirty);
    }

    #[test]
    fn split_line_inserts_directly_below() {
        let mut st = state_at("a\nb\nc", Position::new(1, 1));
        st.split_line_at_cursor();
        assert_eq!(lines(&st), vec!["a", "b", "", "c"]);
        assert_eq!(st.cursor(), Position::new(2, 0));
    }

    #[test]
    fn delete_line_first_line_stays_at_zero() {
        let mut st = state_at("x\ny\nz", Position::origin());
        st.delete_current_line();
        assert_eq!(lines(&st), vec!["y", "z"]);
        assert_eq!(st.cursor(), Position::origin());
    }

    #[test]
    fn delete_line_moves_to_previous_line() {
        let mut st = state_at("x\ny\nz", Position::new(2, 1));
        st.delete_current_line();
        assert_eq!(lines(&st), vec!["x", "y"]);
        assert_eq!(st.cursor(), Position::new(1, 0));
    }

    #[test]
    fn delete_only_line_clears_it() {
        let mut st = state_at("solo", Position::new(0, 4));
        st.delete_current_line();
        assert_eq!(lines(&st), vec![""]);
        assert_eq!(st.cursor(), Position::origin());
        assert!(st.dirty);
    }

    #[test]
    fn tab_is_four_recorded_spaces() {
        let mut st = state_at("x", Position::new(0, 1));
        st.insert_tab();
        assert_eq!(lines(&st), vec!["x    "]);
        assert_eq!(st.undo_depth(), 4);
    }

    #[test]
    fn undo_insert_restores_content_and_cursor() {
        let mut st = state_at("ad", Position::new(0, 1));
        st.insert_char(b'b', true);
        st.insert_char(b'c', true);
        assert!(st.undo().is_some());
        assert_eq!(lines(&st), vec!["abd"]);
        assert_eq!(st.cursor(), Position::new(0, 2));
        assert!(st.undo().is_some());
        assert_eq!(lines(&st), vec!["ad"]);
        assert_eq!(st.cursor(), Position::new(0, 1));
        assert_eq!(st.undo_depth(), 0);
    }

    #[test]
    fn undo_from_another_line_jumps_back() {
        let mut st = state_at("one\ntwo", Position::new(0, 3));
        st.insert_char(b'!', true);
        st.move_down();
        st.move_to_line_start();
        st.undo();
        assert_eq!(lines(&st), vec!["one", "two"]);
        assert_eq!(st.cursor(), Position::new(0, 3));
    }

    #[test]
    fn undo_on_empty_log_changes_nothing() {
        let mut st = state_at("abc", Position::new(0, 1));
        assert!(st.undo().is_none());
        assert_eq!(lines(&st), vec!["abc"]);
        assert_eq!(st.cursor(), Position::new(0, 1));
        assert!(!st.dirty);
    }
}
