//! Line-oriented text buffer.
//!
//! The buffer is an ordered sequence of owned byte lines. Text is treated as
//! plain bytes: one column is one byte, there is no grapheme or UTF-8
//! awareness at this layer. Renderers decode lossily for display.
//!
//! Invariants (hold after every public call):
//! * `line_count() >= 1`; a document always has at least one, possibly empty, line.
//! * Line contents never contain `b'\n'`; line structure lives in the outer sequence.

use std::borrow::Cow;

pub mod motion;

/// A line-based text buffer. Owns all line memory; callers only hold indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<Vec<u8>>,
    pub name: String,
}

/// A position inside a buffer expressed as (line index, byte column within that line).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
    pub fn origin() -> Self {
        Self { line: 0, column: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.column = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.column > max_len {
            self.column = max_len;
        }
    }
}

impl Buffer {
    /// A fresh document: a single empty line.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lines: vec![Vec::new()],
            name: name.into(),
        }
    }

    /// Construct a buffer from newline-delimited text. A trailing newline terminates
    /// the last line rather than opening a new empty one.
    pub fn from_str(name: impl Into<String>, content: &str) -> Self {
        Self::from_bytes(name, content.as_bytes())
    }

    pub fn from_bytes(name: impl Into<String>, content: &[u8]) -> Self {
        let mut buffer = Self {
            lines: Vec::new(),
            name: name.into(),
        };
        let body = content.strip_suffix(b"\n").unwrap_or(content);
        if !content.is_empty() {
            for line in body.split(|b| *b == b'\n') {
                let at = buffer.lines.len();
                buffer.insert_line(at, line);
            }
        }
        if buffer.lines.is_empty() {
            buffer.lines.push(Vec::new());
        }
        buffer
    }

    /// Total number of lines in the buffer (always at least one).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Byte length of a line; zero for out-of-range indices.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, Vec::len)
    }

    /// Raw bytes of the requested line.
    pub fn line(&self, idx: usize) -> Option<&[u8]> {
        self.lines.get(idx).map(Vec::as_slice)
    }

    /// Mutable access to a line's bytes. Callers must not write `b'\n'`.
    pub fn line_mut(&mut self, idx: usize) -> Option<&mut Vec<u8>> {
        self.lines.get_mut(idx)
    }

    /// Line decoded for display (invalid UTF-8 replaced).
    pub fn line_lossy(&self, idx: usize) -> Option<Cow<'_, str>> {
        self.lines.get(idx).map(|l| String::from_utf8_lossy(l))
    }

    /// Iterate all lines in document order.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Insert a new line at `at` (clamped to `line_count()`), shifting later lines down.
    pub fn insert_line(&mut self, at: usize, content: impl Into<Vec<u8>>) {
        let at = at.min(self.lines.len());
        let mut content = content.into();
        content.retain(|b| *b != b'\n');
        self.lines.insert(at, content);
    }

    /// Remove the line at `idx`, shifting later lines up. The last remaining line is
    /// cleared in place instead of removed. Returns `true` when a line was removed.
    pub fn delete_line(&mut self, idx: usize) -> bool {
        if idx >= self.lines.len() {
            return false;
        }
        if self.lines.len() == 1 {
            self.lines[0].clear();
            return false;
        }
        self.lines.remove(idx);
        true
    }

    /// Write `b` at the position's column, shifting the rest of the line right, and
    /// advance the position by one.
    pub fn insert_byte(&mut self, pos: &mut Position, b: u8) {
        self.clamp(pos);
        let line = &mut self.lines[pos.line];
        line.insert(pos.column, b);
        pos.column += 1;
    }

    /// Remove the byte immediately before the position (backspace). Returns the removed
    /// byte, or `None` at column 0 where nothing happens.
    pub fn delete_byte_before(&mut self, pos: &mut Position) -> Option<u8> {
        self.clamp(pos);
        if pos.column == 0 {
            return None;
        }
        let removed = self.lines[pos.line].remove(pos.column - 1);
        pos.column -= 1;
        Some(removed)
    }

    /// Byte immediately before the position, if any.
    pub fn byte_before(&self, pos: Position) -> Option<u8> {
        let line = self.lines.get(pos.line)?;
        if pos.column == 0 {
            return None;
        }
        line.get(pos.column - 1).copied()
    }

    /// Clamp a position so that it satisfies the cursor invariant for this buffer.
    pub fn clamp(&self, pos: &mut Position) {
        pos.clamp_to(self.line_count(), |l| self.line_len(l));
    }

    /// Whether `pos` names a valid cursor location.
    pub fn contains(&self, pos: Position) -> bool {
        pos.line < self.line_count() && pos.column <= self.line_len(pos.line)
    }
}
