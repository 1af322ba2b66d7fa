#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, EditCommand, dispatch};
use core_model::{EditorModel, ScreenMetrics};
use core_state::EditorState;
use core_text::Buffer;

/// Terminal-like geometry: 24 rows of one-row lines (23 visible text lines).
pub const TERM: ScreenMetrics = ScreenMetrics {
    screen_height: 24,
    line_height: 1,
};

pub fn model(text: &str) -> EditorModel {
    EditorModel::new(EditorState::new(Buffer::from_str("test", text)))
}

pub fn run(model: &mut EditorModel, cmds: &[EditCommand]) -> Vec<DispatchResult> {
    cmds.iter().map(|c| dispatch(*c, model, &TERM)).collect()
}

pub fn type_str(model: &mut EditorModel, text: &str) {
    for b in text.bytes() {
        dispatch(EditCommand::InsertChar(b), model, &TERM);
    }
}

pub fn lines(model: &EditorModel) -> Vec<String> {
    model
        .state()
        .buffer()
        .lines()
        .map(|l| String::from_utf8_lossy(l).into_owned())
        .collect()
}
