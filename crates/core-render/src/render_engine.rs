//! Render engine: composes a grid per frame and repaints what changed.
//!
//! Repaint policy:
//! - First frame, size change, theme change or explicit `invalidate` => every row.
//! - Otherwise only rows whose cells differ from the previously emitted grid.
//!
//! Each repainted row is written in full (`width` cells) so the palette background
//! covers the whole line without relying on terminal clear semantics.

use crate::compose::compose;
use crate::style::{Theme, ThemeSet};
use crate::writer::Writer;
use crate::{CellFlags, Grid};
use anyhow::Result;
use core_model::Frame;
use std::io::Write;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub full: bool,
    pub rows_repainted: u16,
    pub print_commands: u64,
    pub cells_printed: u64,
}

#[derive(Debug, Default)]
pub struct RenderEngine {
    themes: ThemeSet,
    prev: Option<Grid>,
    prev_theme: Option<usize>,
    frames: u64,
    last_render_ns: u64,
}

impl RenderEngine {
    pub fn new(themes: ThemeSet) -> Self {
        Self {
            themes,
            ..Self::default()
        }
    }

    pub fn themes(&self) -> &ThemeSet {
        &self.themes
    }

    /// Forget the previous grid; the next frame repaints every row.
    pub fn invalidate(&mut self) {
        self.prev = None;
        tracing::debug!(target: "render", "render_invalidated");
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_render_ns(&self) -> u64 {
        self.last_render_ns
    }

    /// Render `frame` onto a `width` x `height` surface written to `out`.
    pub fn render<W: Write>(
        &mut self,
        frame: &Frame<'_>,
        width: u16,
        height: u16,
        out: &mut W,
    ) -> Result<RenderStats> {
        let start = Instant::now();
        let grid = compose(frame, width, height);
        let theme = self.themes.get(frame.theme_index);

        let full = match &self.prev {
            Some(prev) => {
                prev.width != width
                    || prev.height != height
                    || self.prev_theme != Some(frame.theme_index)
            }
            None => true,
        };
        let rows: Vec<u16> = (0..height)
            .filter(|&y| full || self.prev.as_ref().is_none_or(|p| p.row(y) != grid.row(y)))
            .collect();

        let mut writer = Writer::new();
        for &y in &rows {
            paint_row(&mut writer, &grid, y, &theme);
        }
        let (print_commands, cells_printed) = writer.flush_to(out)?;

        let stats = RenderStats {
            full,
            rows_repainted: rows.len() as u16,
            print_commands,
            cells_printed,
        };
        self.prev = Some(grid);
        self.prev_theme = Some(frame.theme_index);
        self.frames += 1;
        self.last_render_ns = start.elapsed().as_nanos() as u64;
        tracing::trace!(
            target: "render",
            full,
            rows = stats.rows_repainted,
            prints = print_commands,
            cells = cells_printed,
            ns = self.last_render_ns,
            "render_frame"
        );
        Ok(stats)
    }
}

fn paint_row(writer: &mut Writer, grid: &Grid, y: u16, theme: &Theme) {
    writer.move_to(0, y);
    let row = grid.row(y);
    let hud = row.first().is_some_and(|c| c.flags.contains(CellFlags::HUD));
    let (fg, bg) = if hud {
        (theme.text, theme.hud)
    } else {
        (theme.text, theme.background)
    };
    writer.colors(fg, bg);
    for cell in row {
        if cell.flags.contains(CellFlags::REVERSE) {
            writer.reverse(true);
            writer.print_cell(cell.ch);
            writer.reverse(false);
        } else {
            writer.print_cell(cell.ch);
        }
    }
}
