//! Undo handling.
//!
//! Replay may jump the cursor to another line; when it does the viewport snaps
//! to that line the same way a page motion would.

use super::DispatchResult;
use core_model::{EditorModel, ScreenMetrics};

pub(crate) fn handle_undo(model: &mut EditorModel, metrics: &ScreenMetrics) -> DispatchResult {
    let (state, viewport) = model.split_state_and_viewport();
    let before = state.cursor();
    let Some(record) = state.undo() else {
        tracing::trace!(target: "actions.dispatch", op = "undo", "undo_empty");
        return DispatchResult::clean();
    };
    let after = state.cursor();
    if after.line != before.line {
        viewport.snap_to_line(after.line, metrics.line_height);
    }
    tracing::trace!(target: "actions.dispatch", op = "undo", action = ?record.action, line = after.line, column = after.column, "undo");
    DispatchResult::dirty()
}
