//! File IO helpers: the load/save boundary.
//!
//! Synchronous and minimal. Files are newline-delimited byte lines; each line is
//! written back followed by `\n`. Bytes are never re-encoded.

use core_state::EditorState;
use core_text::Buffer;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("document has no file name")]
    NoFileName,
}

fn buffer_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string())
}

/// Read `path` into a buffer. A missing file yields a single empty line.
pub fn read_document(path: &Path) -> Result<Buffer, IoError> {
    let name = buffer_name(path);
    match std::fs::read(path) {
        Ok(bytes) => {
            let buffer = Buffer::from_bytes(name, &bytes);
            tracing::info!(target: "io", path = %path.display(), lines = buffer.line_count(), bytes = bytes.len(), "file_read");
            Ok(buffer)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(target: "io", path = %path.display(), "file_not_found_new_document");
            Ok(Buffer::new(name))
        }
        Err(source) => Err(IoError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Build the editor state for `path`. Any read failure is logged and falls back to
/// an empty document still bound to `path`, so a later save can create it.
pub fn load_document(path: &Path) -> EditorState {
    let buffer = read_document(path).unwrap_or_else(|e| {
        tracing::error!(target: "io", error = %e, "file_open_error");
        Buffer::new(buffer_name(path))
    });
    EditorState::with_file(buffer, path.to_path_buf())
}

/// Serialize every line followed by `\n`.
pub fn serialize(buffer: &Buffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(buffer.lines().map(|l| l.len() + 1).sum());
    for line in buffer.lines() {
        out.extend_from_slice(line);
        out.push(b'\n');
    }
    out
}

/// Write the buffer to `path`. Returns bytes written. Does not touch the dirty flag.
pub fn write_document(state: &EditorState, path: &Path) -> Result<usize, IoError> {
    let content = serialize(state.buffer());
    match std::fs::write(path, &content) {
        Ok(()) => {
            tracing::info!(target: "io", path = %path.display(), bytes = content.len(), "file_written");
            Ok(content.len())
        }
        Err(source) => {
            tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
            Err(IoError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Save to the state's own file name, clearing the dirty flag only on success.
pub fn save(state: &mut EditorState) -> Result<usize, IoError> {
    let path = state.file_name.clone().ok_or(IoError::NoFileName)?;
    let written = write_document(state, &path)?;
    state.mark_clean();
    Ok(written)
}
