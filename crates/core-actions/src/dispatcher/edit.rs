//! Text edit command handling.
//!
//! Character edits are recorded in the undo log; Enter and DeleteLine are not.
//! Enter and DeleteLine move the cursor vertically, so they also step the
//! viewport the same way a single Up/Down motion would.

use super::DispatchResult;
use core_events::EditCommand;
use core_model::{EditorModel, ScreenMetrics};

pub(crate) fn handle_edit(
    cmd: EditCommand,
    model: &mut EditorModel,
    metrics: &ScreenMetrics,
) -> DispatchResult {
    let (state, viewport) = model.split_state_and_viewport();
    let before = state.cursor();
    let result = match cmd {
        EditCommand::InsertChar(c) => {
            state.insert_char(c, true);
            DispatchResult::dirty()
        }
        EditCommand::Tab => {
            state.insert_tab();
            DispatchResult::dirty()
        }
        EditCommand::DeleteBack => {
            if state.delete_char_before_cursor(true) {
                DispatchResult::dirty()
            } else {
                DispatchResult::clean()
            }
        }
        EditCommand::Enter => {
            state.split_line_at_cursor();
            viewport.step_down(metrics);
            DispatchResult::buffer_replaced()
        }
        EditCommand::DeleteLine => {
            state.delete_current_line();
            if state.cursor().line < before.line {
                viewport.step_up(metrics);
            }
            DispatchResult::buffer_replaced()
        }
        _ => DispatchResult::clean(),
    };
    let after = state.cursor();
    tracing::trace!(target: "actions.dispatch", ?cmd, line = before.line, column = before.column, to_line = after.line, to_column = after.column, "edit");
    result
}
