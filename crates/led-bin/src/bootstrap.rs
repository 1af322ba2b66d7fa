//! Startup: configuration, document load, and the initial model.

use anyhow::Result;
use core_actions::io_ops;
use core_config::Config;
use core_model::{EditorModel, FontSizing, Presentation};
use core_render::ThemeSet;
use std::path::Path;
use tracing::info;

pub struct Bootstrap {
    pub model: EditorModel,
    pub config: Config,
    pub themes: ThemeSet,
    pub title: String,
}

/// Theme table and font sizing from config, as handed to the model and renderer.
pub fn presentation_from(config: &Config) -> (Presentation, ThemeSet) {
    let palettes = config.palettes();
    let font_cfg = &config.file.font;
    let (min, max) = font_cfg.bounds();
    let presentation = Presentation {
        theme_index: config.default_theme(),
        theme_count: palettes.len(),
        font: FontSizing {
            size: font_cfg.size,
            step: font_cfg.step,
            min,
            max,
        }
        .normalized(),
    };
    (presentation, ThemeSet::from_palettes(&palettes))
}

impl Bootstrap {
    pub fn load(path: &Path, config: Config) -> Result<Self> {
        let state = io_ops::load_document(path);
        let (presentation, themes) = presentation_from(&config);
        let model = EditorModel::with_presentation(state, presentation);
        info!(
            target: "runtime.startup",
            path = %path.display(),
            lines = model.state().buffer().line_count(),
            themes = themes.len(),
            font_size = model.presentation().font.size,
            config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
            "bootstrap_complete"
        );
        Ok(Self {
            model,
            config,
            themes,
            title: core_terminal::window_title(&path.display().to_string()),
        })
    }
}
