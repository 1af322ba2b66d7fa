//! Motion sub-dispatch (cursor movement).
//!
//! Single-line vertical moves step the viewport hysteresis counter; page moves
//! snap the viewport to the new cursor line. Horizontal moves never touch it.

use super::DispatchResult;
use core_events::EditCommand;
use core_model::{EditorModel, ScreenMetrics};

pub(crate) fn handle_motion(
    cmd: EditCommand,
    model: &mut EditorModel,
    metrics: &ScreenMetrics,
) -> DispatchResult {
    let (state, viewport) = model.split_state_and_viewport();
    let before = state.cursor();
    let offset_before = viewport.offset();
    match cmd {
        EditCommand::MoveLeft => state.move_left(),
        EditCommand::MoveRight => state.move_right(),
        EditCommand::MoveToLineStart => state.move_to_line_start(),
        EditCommand::MoveToLineEnd => state.move_to_line_end(),
        EditCommand::MoveUp => {
            if state.move_up().moved() {
                viewport.step_up(metrics);
            }
        }
        EditCommand::MoveDown => {
            if state.move_down().moved() {
                viewport.step_down(metrics);
            }
        }
        EditCommand::PageUp => {
            state.page_up(metrics.visible_lines());
            viewport.snap_to_line(state.cursor().line, metrics.line_height);
        }
        EditCommand::PageDown => {
            state.page_down(metrics.visible_lines());
            viewport.snap_to_line(state.cursor().line, metrics.line_height);
        }
        _ => {}
    }
    let after = state.cursor();
    tracing::trace!(target: "actions.dispatch", ?cmd, line = before.line, column = before.column, to_line = after.line, to_column = after.column, "motion");
    if after != before || viewport.offset() != offset_before {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::EditorState;
    use core_text::{Buffer, Position};

    // Four visible text lines.
    const M: ScreenMetrics = ScreenMetrics {
        screen_height: 5,
        line_height: 1,
    };

    fn model_with_lines(n: usize) -> EditorModel {
        let text = (0..n)
            .map(|i| format!("line{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        EditorModel::new(EditorState::new(Buffer::from_str("t", &text)))
    }

    #[test]
    fn down_scrolls_only_after_window_fills() {
        let mut m = model_with_lines(10);
        for _ in 0..3 {
            handle_motion(EditCommand::MoveDown, &mut m, &M);
        }
        assert_eq!(m.viewport().offset(), 0);
        handle_motion(EditCommand::MoveDown, &mut m, &M);
        assert_eq!(m.state().cursor().line, 4);
        assert_eq!(m.viewport().offset(), 1);
    }

    #[test]
    fn up_at_top_snaps_column_without_scrolling() {
        let mut m = model_with_lines(3);
        m.state_mut().set_cursor(Position::new(0, 3));
        let r = handle_motion(EditCommand::MoveUp, &mut m, &M);
        assert!(r.dirty);
        assert_eq!(m.state().cursor(), Position::origin());
        assert_eq!(m.viewport().line_scroll(), 1);
    }

    #[test]
    fn down_at_bottom_snaps_to_line_end() {
        let mut m = model_with_lines(2);
        m.state_mut().set_cursor(Position::new(1, 0));
        handle_motion(EditCommand::MoveDown, &mut m, &M);
        assert_eq!(m.state().cursor(), Position::new(1, 5));
        assert_eq!(m.viewport().line_scroll(), 1, "no line change, no step");
    }

    #[test]
    fn page_down_jumps_visible_lines_and_snaps() {
        let mut m = model_with_lines(20);
        handle_motion(EditCommand::PageDown, &mut m, &M);
        assert_eq!(m.state().cursor(), Position::new(4, 5));
        assert_eq!(m.viewport().offset(), 4);
        assert_eq!(m.viewport().line_scroll(), 1);
    }

    #[test]
    fn page_down_clamps_to_last_line() {
        let mut m = model_with_lines(6);
        handle_motion(EditCommand::PageDown, &mut m, &M);
        handle_motion(EditCommand::PageDown, &mut m, &M);
        assert_eq!(m.state().cursor().line, 5);
        assert_eq!(m.viewport().offset(), 5);
    }

    #[test]
    fn page_up_clamps_to_first_line() {
        let mut m = model_with_lines(6);
        m.state_mut().set_cursor(Position::new(2, 0));
        handle_motion(EditCommand::PageUp, &mut m, &M);
        assert_eq!(m.state().cursor(), Position::new(0, 5));
        assert_eq!(m.viewport().offset(), 0);
    }

    #[test]
    fn page_uses_line_height_for_offset() {
        let metrics = ScreenMetrics::new(120, 24);
        let mut m = model_with_lines(20);
        handle_motion(EditCommand::PageDown, &mut m, &metrics);
        assert_eq!(m.state().cursor().line, 4);
        assert_eq!(m.viewport().offset(), 96);
    }

    #[test]
    fn horizontal_moves_leave_viewport() {
        let mut m = model_with_lines(2);
        handle_motion(EditCommand::MoveToLineEnd, &mut m, &M);
        handle_motion(EditCommand::MoveLeft, &mut m, &M);
        assert_eq!(m.state().cursor(), Position::new(0, 4));
        handle_motion(EditCommand::MoveToLineStart, &mut m, &M);
        assert_eq!(m.state().cursor(), Position::origin());
        assert_eq!(m.viewport().offset(), 0);
    }
}
