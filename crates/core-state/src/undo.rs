use tracing::trace;

/// The inverse action an undo record replays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndoAction {
    /// Reverses an inserted character by deleting it again.
    DeleteChar,
    /// Reverses a deleted character by inserting it back.
    ReinsertChar,
}

/// Inverse of exactly one character-level edit.
///
/// `column` is the cursor column the original edit was anchored at: for an insert the
/// column after the inserted byte, for a backspace the column before the cursor moved
/// back. In both cases the affected byte lives at `column - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoRecord {
    pub action: UndoAction,
    pub line: usize,
    pub column: usize,
    pub ch: u8,
}

impl UndoRecord {
    pub fn delete_char(line: usize, column: usize, ch: u8) -> Self {
        Self {
            action: UndoAction::DeleteChar,
            line,
            column,
            ch,
        }
    }

    pub fn reinsert_char(line: usize, column: usize, ch: u8) -> Self {
        Self {
            action: UndoAction::ReinsertChar,
            line,
            column,
            ch,
        }
    }
}

/// Append-only LIFO of undo records. There is no redo stack; a popped record is gone.
#[derive(Debug, Default, Clone)]
pub struct UndoLog {
    records: Vec<UndoRecord>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: UndoRecord) {
        self.records.push(record);
        trace!(target: "state.undo", depth = self.records.len(), action = ?record.action, line = record.line, column = record.column, "undo_push");
    }

    pub fn pop(&mut self) -> Option<UndoRecord> {
        let record = self.records.pop();
        if let Some(r) = &record {
            trace!(target: "state.undo", depth = self.records.len(), action = ?r.action, line = r.line, column = r.column, "undo_pop");
        }
        record
    }

    pub fn peek(&self) -> Option<&UndoRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all history (end of a document session).
    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            trace!(target: "state.undo", dropped = self.records.len(), "undo_cleared");
        }
        self.records.clear();
    }
}
