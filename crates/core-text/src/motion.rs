//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair and are free of editor state.
//! Horizontal motion never crosses a line boundary. Vertical motion at the first or
//! last line degenerates into a column snap instead of a no-op.

use crate::{Buffer, Position};

/// Outcome of a vertical motion, consumed by scroll tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalMotion {
    /// The cursor changed line.
    Moved,
    /// Already at the boundary line; only the column was snapped.
    Snapped,
}

impl VerticalMotion {
    pub fn moved(self) -> bool {
        matches!(self, VerticalMotion::Moved)
    }
}

/// Move left one byte. No-op at column 0.
pub fn left(_buf: &Buffer, pos: &mut Position) {
    pos.column = pos.column.saturating_sub(1);
}

/// Move right one byte. No-op at end of line.
pub fn right(buf: &Buffer, pos: &mut Position) {
    if pos.column < buf.line_len(pos.line) {
        pos.column += 1;
    }
}

/// Move to start of line.
pub fn line_start(_buf: &Buffer, pos: &mut Position) {
    pos.column = 0;
}

/// Move to end of line (after last byte).
pub fn line_end(buf: &Buffer, pos: &mut Position) {
    pos.column = buf.line_len(pos.line);
}

/// Move up one line, clamping the column to the new line's length. On the first line
/// the column snaps to 0.
pub fn up(buf: &Buffer, pos: &mut Position) -> VerticalMotion {
    if pos.line == 0 {
        pos.column = 0;
        return VerticalMotion::Snapped;
    }
    pos.line -= 1;
    pos.column = pos.column.min(buf.line_len(pos.line));
    VerticalMotion::Moved
}

/// Move down one line, clamping the column to the new line's length. On the last line
/// the column snaps to the line end.
pub fn down(buf: &Buffer, pos: &mut Position) -> VerticalMotion {
    if pos.line + 1 >= buf.line_count() {
        pos.column = buf.line_len(pos.line);
        return VerticalMotion::Snapped;
    }
    pos.line += 1;
    pos.column = pos.column.min(buf.line_len(pos.line));
    VerticalMotion::Moved
}

/// Jump up by `lines` lines (clamped to the first line); column snaps to line end.
pub fn page_up(buf: &Buffer, pos: &mut Position, lines: usize) {
    pos.line = pos.line.saturating_sub(lines);
    pos.column = buf.line_len(pos.line);
}

/// Jump down by `lines` lines (clamped to the last line); column snaps to line end.
pub fn page_down(buf: &Buffer, pos: &mut Position, lines: usize) {
    let last = buf.line_count().saturating_sub(1);
    pos.line = pos.line.saturating_add(lines).min(last);
    pos.column = buf.line_len(pos.line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_and_line_boundaries() {
        let buf = Buffer::from_str("t", "abcd");
        let mut pos = Position::origin();
        left(&buf, &mut pos);
        assert_eq!(pos.column, 0, "left at column 0 is a no-op");
        while pos.column < buf.line_len(0) {
            right(&buf, &mut pos);
        }
        right(&buf, &mut pos);
        assert_eq!(pos.column, 4, "right at end of line is a no-op");
        left(&buf, &mut pos);
        left(&buf, &mut pos);
        assert_eq!(pos.column, 2);
        line_start(&buf, &mut pos);
        assert_eq!(pos.column, 0);
        line_end(&buf, &mut pos);
        assert_eq!(pos.column, 4);
    }

    #[test]
    fn horizontal_motion_never_joins_lines() {
        let buf = Buffer::from_str("t", "ab\ncd");
        let mut pos = Position::new(1, 0);
        left(&buf, &mut pos);
        assert_eq!(pos, Position::new(1, 0));
        let mut pos = Position::new(0, 2);
        right(&buf, &mut pos);
        assert_eq!(pos, Position::new(0, 2));
    }

    #[test]
    fn vertical_motion_clamps_column() {
        let buf = Buffer::from_str("t", "long line\nab\nanother long");
        let mut pos = Position::new(0, 7);
        assert_eq!(down(&buf, &mut pos), VerticalMotion::Moved);
        assert_eq!(pos, Position::new(1, 2));
        assert_eq!(down(&buf, &mut pos), VerticalMotion::Moved);
        assert_eq!(pos, Position::new(2, 2));
        assert_eq!(up(&buf, &mut pos), VerticalMotion::Moved);
        assert_eq!(pos, Position::new(1, 2));
    }

    #[test]
    fn vertical_motion_at_boundary_snaps_column() {
        let buf = Buffer::from_str("t", "abc\nxyz");
        let mut pos = Position::new(0, 2);
        assert_eq!(up(&buf, &mut pos), VerticalMotion::Snapped);
        assert_eq!(pos, Position::new(0, 0));
        let mut pos = Position::new(1, 1);
        assert_eq!(down(&buf, &mut pos), VerticalMotion::Snapped);
        assert_eq!(pos, Position::new(1, 3));
    }

    #[test]
    fn page_motion_clamps_and_snaps_to_line_end() {
        let buf = Buffer::from_str("t", "a\nbb\nccc\ndddd\neeeee");
        let mut pos = Position::new(1, 0);
        page_down(&buf, &mut pos, 2);
        assert_eq!(pos, Position::new(3, 4));
        page_down(&buf, &mut pos, 10);
        assert_eq!(pos, Position::new(4, 5));
        page_up(&buf, &mut pos, 3);
        assert_eq!(pos, Position::new(1, 2));
        page_up(&buf, &mut pos, 10);
        assert_eq!(pos, Position::new(0, 1));
    }
}
