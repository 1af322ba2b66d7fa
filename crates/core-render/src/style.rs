//! Palette colors as terminal colors.
//!
//! Themes are configuration handed to the renderer at construction; the editor
//! core only tracks which index is selected.

use core_config::{Palette, Rgb};
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub hud: Color,
}

#[inline]
fn rgb([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

impl Theme {
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            background: rgb(p.background),
            text: rgb(p.text),
            hud: rgb(p.hud),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Ordered theme table indexed by `Frame::theme_index`.
#[derive(Debug, Clone)]
pub struct ThemeSet {
    themes: Vec<Theme>,
}

impl ThemeSet {
    pub fn from_palettes(palettes: &[Palette]) -> Self {
        Self {
            themes: palettes.iter().map(Theme::from_palette).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Theme at `index`; falls back to the first entry, then to the built-in dark theme.
    pub fn get(&self, index: usize) -> Theme {
        self.themes
            .get(index)
            .or_else(|| self.themes.first())
            .copied()
            .unwrap_or_default()
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self::from_palettes(&[Palette::dark(), Palette::light()])
    }
}
