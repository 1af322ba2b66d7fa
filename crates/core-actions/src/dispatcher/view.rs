//! Commands that leave buffer content alone: save, zoom, theme switching.

use super::DispatchResult;
use crate::io_ops;
use core_events::EditCommand;
use core_model::{EditorModel, ScreenMetrics};

pub(crate) fn handle_save(model: &mut EditorModel) -> DispatchResult {
    match io_ops::save(model.state_mut()) {
        Ok(bytes) => {
            tracing::info!(target: "actions.dispatch", bytes, "save_ok");
        }
        Err(e) => {
            tracing::warn!(target: "actions.dispatch", error = %e, "save_failed");
            model.set_notice("save failed");
        }
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_presentation(
    cmd: EditCommand,
    model: &mut EditorModel,
    metrics: &ScreenMetrics,
) -> DispatchResult {
    let presentation = model.presentation_mut();
    let changed = match cmd {
        EditCommand::ZoomIn => presentation.font.zoom_in(),
        EditCommand::ZoomOut => presentation.font.zoom_out(),
        EditCommand::SwitchTheme(idx) => presentation.select_theme(idx),
        _ => false,
    };
    if !changed {
        return DispatchResult::clean();
    }
    let font_size = model.presentation().font.size;
    let theme_index = model.presentation().theme_index;
    if matches!(cmd, EditCommand::ZoomIn | EditCommand::ZoomOut) {
        model.snap_viewport_to_cursor(metrics.line_height);
    }
    tracing::debug!(target: "actions.dispatch", ?cmd, font_size, theme_index, "presentation_changed");
    DispatchResult::dirty()
}
