//! Command dispatch and document I/O.
//!
//! `dispatch` is the single entry point that applies an `EditCommand` to an
//! `EditorModel`. `io_ops` holds the load/save boundary, the only fallible part
//! of the editor core.

mod dispatcher;
pub mod io_ops;

pub use core_events::EditCommand;
pub use dispatcher::{DispatchResult, dispatch};
pub use io_ops::IoError;
