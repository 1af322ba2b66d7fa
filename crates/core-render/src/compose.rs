//! Frame → grid layout.
//!
//! Rows `0..height-1` show document lines starting at `Frame::first_visible_line`;
//! the last row is the HUD. When the cursor column does not fit in the width,
//! every text row is panned left so the cursor cell stays on screen.

use crate::status::{StatusContext, build_status};
use crate::{CellFlags, Grid, display_char};
use core_model::Frame;

/// Horizontal pan needed to keep `column` inside `width` cells.
pub fn horizontal_offset(column: usize, width: u16) -> usize {
    let w = width as usize;
    if w == 0 {
        return 0;
    }
    column.saturating_sub(w - 1)
}

pub fn compose(frame: &Frame<'_>, width: u16, height: u16) -> Grid {
    let mut grid = Grid::new(width, height);
    if height == 0 || width == 0 {
        return grid;
    }
    let text_rows = (height - 1) as usize;
    let pan = horizontal_offset(frame.cursor.column, width);

    for (row, (_, line)) in frame.visible().take(text_rows).enumerate() {
        let y = row as u16;
        for (x, &b) in line.iter().skip(pan).take(width as usize).enumerate() {
            grid.set(x as u16, y, display_char(b), CellFlags::empty());
        }
    }

    if let Some(row) = frame
        .cursor
        .line
        .checked_sub(frame.first_visible_line)
        .filter(|r| *r < text_rows.min(frame.visible_lines))
    {
        let x = (frame.cursor.column - pan) as u16;
        grid.apply_flags(x, row as u16, CellFlags::REVERSE | CellFlags::CURSOR);
    }

    let hud_y = height - 1;
    grid.flag_row(hud_y, CellFlags::HUD);
    let status = build_status(&StatusContext::from_frame(frame), width as usize);
    grid.put_str(0, hud_y, &status, CellFlags::HUD);
    grid
}
