//! Dispatcher applying `EditCommand` to mutable editor state.
//!
//! Sub-modules:
//! * `edit`   - content mutation (insert, backspace, enter, tab, delete line)
//! * `motion` - cursor movement and the viewport steps it drives
//! * `undo`   - undo replay
//! * `view`   - save, zoom, theme (no buffer mutation)
//!
//! Every command is applied to completion before `dispatch` returns; callers
//! render afterwards and always observe a settled state.

use core_events::EditCommand;
use core_model::{EditorModel, ScreenMetrics};

mod edit;
mod motion;
mod undo;
mod view;

/// Result of dispatching a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Something visible changed; the frame should be redrawn.
    pub dirty: bool,
    pub quit: bool,
    /// Line structure changed (lines added or removed); partial redraws keyed
    /// on line indices are invalid.
    pub buffer_replaced: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            buffer_replaced: false,
        }
    }
    pub fn buffer_replaced() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: true,
        }
    }

    fn or_dirty(mut self, dirty: bool) -> Self {
        self.dirty |= dirty;
        self
    }
}

/// Apply a command to the model. `metrics` supplies the current screen geometry
/// used for page size and viewport arithmetic.
pub fn dispatch(
    cmd: EditCommand,
    model: &mut EditorModel,
    metrics: &ScreenMetrics,
) -> DispatchResult {
    let had_notice = model.clear_notice();
    let was_dirty = model.state().dirty;
    tracing::trace!(target: "actions.dispatch", ?cmd, "dispatch");

    let result = match cmd {
        EditCommand::InsertChar(_)
        | EditCommand::DeleteBack
        | EditCommand::Enter
        | EditCommand::Tab
        | EditCommand::DeleteLine => edit::handle_edit(cmd, model, metrics),
        EditCommand::MoveLeft
        | EditCommand::MoveRight
        | EditCommand::MoveUp
        | EditCommand::MoveDown
        | EditCommand::PageUp
        | EditCommand::PageDown
        | EditCommand::MoveToLineStart
        | EditCommand::MoveToLineEnd => motion::handle_motion(cmd, model, metrics),
        EditCommand::Undo => undo::handle_undo(model, metrics),
        EditCommand::Save => view::handle_save(model),
        EditCommand::ZoomIn | EditCommand::ZoomOut | EditCommand::SwitchTheme(_) => {
            view::handle_presentation(cmd, model, metrics)
        }
        EditCommand::Quit => {
            tracing::info!(target: "actions.dispatch", dirty = model.state().dirty, "quit_requested");
            DispatchResult::quit()
        }
    };

    debug_assert!(
        model.state().invariants_hold(),
        "buffer/cursor invariant violated after {cmd:?}"
    );
    debug_assert!(
        cmd.mutates_buffer() || cmd == EditCommand::Save || model.state().dirty == was_dirty,
        "{cmd:?} changed the dirty flag"
    );
    result.or_dirty(had_notice)
}
