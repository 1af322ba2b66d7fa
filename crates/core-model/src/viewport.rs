//! Vertical scroll state.
//!
//! The viewport tracks a scroll `offset` measured in the same unit as the line
//! height it is handed (pixels for a graphical front end, rows for a terminal)
//! and a one-based `line_scroll` counter: the screen row the cursor occupies
//! inside the visible window. Single vertical steps move the counter and only
//! shift the offset once the cursor would leave the window; jumps snap the
//! offset directly to the cursor line.
//!
//! Line height is always a parameter. Nothing here knows about fonts.

use tracing::trace;

/// Screen geometry supplied by the front end on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    pub screen_height: usize,
    pub line_height: usize,
}

impl ScreenMetrics {
    pub fn new(screen_height: usize, line_height: usize) -> Self {
        Self {
            screen_height,
            line_height,
        }
    }

    /// Fully visible text lines: screen height over line height, minus one row
    /// reserved for the status line.
    pub fn visible_lines(&self) -> usize {
        (self.screen_height / self.line_height.max(1)).saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    line_scroll: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            offset: 0,
            line_scroll: 1,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line_scroll(&self) -> usize {
        self.line_scroll
    }

    /// Index of the topmost buffer line shown for the given line height.
    pub fn first_visible_line(&self, line_height: usize) -> usize {
        self.offset / line_height.max(1)
    }

    /// Cursor moved one line up.
    pub fn step_up(&mut self, metrics: &ScreenMetrics) {
        self.line_scroll = self.line_scroll.saturating_sub(1);
        if self.line_scroll == 0 {
            self.offset = self.offset.saturating_sub(metrics.line_height);
            self.line_scroll = 1;
            trace!(target: "model.viewport", offset = self.offset, "scroll_up");
        }
    }

    /// Cursor moved one line down.
    pub fn step_down(&mut self, metrics: &ScreenMetrics) {
        self.line_scroll += 1;
        if self.line_scroll > metrics.visible_lines() {
            self.offset += metrics.line_height;
            self.line_scroll -= 1;
            trace!(target: "model.viewport", offset = self.offset, "scroll_down");
        }
    }

    /// Pull the window down after it shrank so the cursor row stays inside it.
    /// The cursor keeps its buffer line; only the offset moves.
    pub fn fit(&mut self, metrics: &ScreenMetrics) {
        let rows = metrics.visible_lines().max(1);
        if self.line_scroll <= rows {
            return;
        }
        let excess = self.line_scroll - rows;
        self.offset += excess * metrics.line_height;
        self.line_scroll = rows;
        trace!(target: "model.viewport", offset = self.offset, rows, "fit");
    }

    /// Jump so `line` sits at the top of the window.
    pub fn snap_to_line(&mut self, line: usize, line_height: usize) {
        self.offset = line * line_height;
        self.line_scroll = 1;
        trace!(target: "model.viewport", line, offset = self.offset, "snap");
    }
}
