//! High-level editor model: one document session plus the view state around it.
//!
//! `EditorModel` owns the `EditorState` (buffer, cursor, undo log, dirty flag),
//! the `Viewport`, and presentation values (theme index, font size) that are
//! carried for the renderer but never read by the edit engine. Renderers obtain
//! a borrowed [`Frame`] once per tick and must not mutate anything.
//!
//! Invariants:
//! * `presentation.font.size` always lies within `[min, max]`.
//! * `presentation.theme_index < presentation.theme_count` (when `theme_count > 0`).

use core_state::EditorState;
use core_text::{Buffer, Position};
use std::path::Path;
use tracing::debug;

mod viewport;
pub use viewport::{ScreenMetrics, Viewport};

/// Font size bounds and zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSizing {
    pub size: u16,
    pub step: u16,
    pub min: u16,
    pub max: u16,
}

impl Default for FontSizing {
    fn default() -> Self {
        Self::from_initial(24, 4)
    }
}

impl FontSizing {
    /// Bounds default to half and double the initial size.
    pub fn from_initial(size: u16, step: u16) -> Self {
        Self {
            size,
            step,
            min: size / 2,
            max: size.saturating_mul(2),
        }
        .normalized()
    }

    /// Swap inverted bounds and pull `size` into range.
    pub fn normalized(mut self) -> Self {
        if self.min > self.max {
            std::mem::swap(&mut self.min, &mut self.max);
        }
        self.size = self.size.clamp(self.min, self.max);
        self
    }

    /// Returns whether the size changed.
    pub fn zoom_in(&mut self) -> bool {
        let next = self.size.saturating_add(self.step).min(self.max);
        std::mem::replace(&mut self.size, next) != next
    }

    /// Returns whether the size changed.
    pub fn zoom_out(&mut self) -> bool {
        let next = self.size.saturating_sub(self.step).max(self.min);
        std::mem::replace(&mut self.size, next) != next
    }
}

/// Values owned by the front end and passed through the model untouched by editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub theme_index: usize,
    pub theme_count: usize,
    pub font: FontSizing,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            theme_index: 0,
            theme_count: 2,
            font: FontSizing::default(),
        }
    }
}

impl Presentation {
    /// Select a theme; out-of-range indices are ignored. Returns whether it changed.
    pub fn select_theme(&mut self, index: usize) -> bool {
        if index >= self.theme_count || index == self.theme_index {
            return false;
        }
        self.theme_index = index;
        true
    }
}

pub struct EditorModel {
    state: EditorState,
    viewport: Viewport,
    presentation: Presentation,
    notice: Option<String>,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self::with_presentation(state, Presentation::default())
    }

    pub fn with_presentation(state: EditorState, presentation: Presentation) -> Self {
        let mut presentation = presentation;
        presentation.font = presentation.font.normalized();
        if presentation.theme_index >= presentation.theme_count {
            presentation.theme_index = 0;
        }
        Self {
            state,
            viewport: Viewport::new(),
            presentation,
            notice: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Disjoint mutable access to state and viewport for a single dispatch step.
    pub fn split_state_and_viewport(&mut self) -> (&mut EditorState, &mut Viewport) {
        (&mut self.state, &mut self.viewport)
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.presentation
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Transient status message shown until the next command.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        let notice = notice.into();
        debug!(target: "model", %notice, "notice_set");
        self.notice = Some(notice);
    }

    /// Returns whether a notice was present.
    pub fn clear_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    /// Snap the viewport so the cursor line is at the top.
    pub fn snap_viewport_to_cursor(&mut self, line_height: usize) {
        let line = self.state.cursor().line;
        self.viewport.snap_to_line(line, line_height);
    }

    /// Re-fit the viewport to new screen geometry.
    pub fn fit_viewport(&mut self, metrics: &ScreenMetrics) {
        self.viewport.fit(metrics);
    }

    pub fn frame(&self, metrics: &ScreenMetrics) -> Frame<'_> {
        Frame {
            buffer: self.state.buffer(),
            cursor: self.state.cursor(),
            char_before_cursor: self.state.char_before_cursor(),
            scroll_offset: self.viewport.offset(),
            first_visible_line: self.viewport.first_visible_line(metrics.line_height),
            visible_lines: metrics.visible_lines(),
            dirty: self.state.dirty,
            theme_index: self.presentation.theme_index,
            font_size: self.presentation.font.size,
            file_name: self.state.file_name.as_deref(),
            notice: self.notice.as_deref(),
        }
    }
}

/// Read-only snapshot handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    buffer: &'a Buffer,
    pub cursor: Position,
    /// `None` at column 0; renderers draw a zero-width cursor then.
    pub char_before_cursor: Option<u8>,
    pub scroll_offset: usize,
    pub first_visible_line: usize,
    pub visible_lines: usize,
    pub dirty: bool,
    pub theme_index: usize,
    pub font_size: u16,
    pub file_name: Option<&'a Path>,
    pub notice: Option<&'a str>,
}

impl<'a> Frame<'a> {
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn line(&self, idx: usize) -> Option<&'a [u8]> {
        self.buffer.line(idx)
    }

    /// All lines in document order.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &'a [u8]> + 'a {
        self.buffer.lines()
    }

    /// Lines inside the visible window, paired with their buffer index.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &'a [u8])> + 'a {
        let buffer = self.buffer;
        (self.first_visible_line..)
            .take(self.visible_lines)
            .map_while(move |idx| buffer.line(idx).map(|l| (idx, l)))
    }

    /// Display name of the document (`"untitled"` when none).
    pub fn display_name(&self) -> String {
        self.file_name
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "untitled".to_string())
    }
}
