//! HUD status line composition.
//!
//! Format: `<name> [*] | <line>:<col>` with `[*]` only when the document is
//! dirty, followed by ` | <notice>` while a transient notice is set.
//! * `<name>` is the base file name, or `untitled` when the document has none.
//! * Line and column are shown 1-based.
//!
//! Built in two stages: `compose_status` produces ordered `StatusSegment`s and
//! `format_status` renders them. `fit_status` renders into a fixed width: the
//! file name is shortened first, then the notice dropped, and the position is
//! always kept whole. Callers that only need the string use `build_status`.

use core_model::Frame;
use std::borrow::Cow;
use std::path::Path;

pub const UNTITLED: &str = "untitled";

/// What the status line needs from the frame.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    pub file_name: Option<&'a Path>,
    pub dirty: bool,
    pub line: usize, // 0-based
    pub col: usize,  // 0-based
    pub notice: Option<&'a str>,
}

impl<'a> StatusContext<'a> {
    pub fn from_frame(frame: &Frame<'a>) -> Self {
        Self {
            file_name: frame.file_name,
            dirty: frame.dirty,
            line: frame.cursor.line,
            col: frame.cursor.column,
            notice: frame.notice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName(Cow<'a, str>),
    Dirty,
    Position { line_1: usize, col_1: usize },
    Notice(&'a str),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name: Cow<'a, str> = match ctx.file_name {
        Some(p) => match p.file_name() {
            Some(n) => n.to_string_lossy(),
            None => p.to_string_lossy(),
        },
        None => Cow::Borrowed(UNTITLED),
    };
    let mut out = Vec::with_capacity(4);
    out.push(StatusSegment::FileName(name));
    if ctx.dirty {
        out.push(StatusSegment::Dirty);
    }
    out.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        col_1: ctx.col + 1,
    });
    if let Some(n) = ctx.notice.filter(|n| !n.is_empty()) {
        out.push(StatusSegment::Notice(n));
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(48);
    for seg in segments {
        match seg {
            StatusSegment::FileName(name) => s.push_str(name),
            StatusSegment::Dirty => s.push_str(" [*]"),
            StatusSegment::Position { line_1, col_1 } => {
                s.push_str(&format!(" | {line_1}:{col_1}"));
            }
            StatusSegment::Notice(text) => {
                s.push_str(" | ");
                s.push_str(text);
            }
        }
    }
    s
}

const ELLIPSIS: char = '~';

/// Render `segments` into at most `width` columns.
pub fn fit_status(segments: &[StatusSegment<'_>], width: usize) -> String {
    let full = format_status(segments);
    if full.chars().count() <= width {
        return full;
    }
    let name = segments.iter().find_map(|seg| match seg {
        StatusSegment::FileName(name) => Some(&**name),
        _ => None,
    });
    let name = name.unwrap_or_default();

    let without_name: Vec<_> = segments
        .iter()
        .filter(|seg| !matches!(seg, StatusSegment::FileName(_)))
        .cloned()
        .collect();
    if let Some(s) = shorten_name(name, &format_status(&without_name), width) {
        return s;
    }

    let without_notice: Vec<_> = without_name
        .into_iter()
        .filter(|seg| !matches!(seg, StatusSegment::Notice(_)))
        .collect();
    if let Some(s) = shorten_name(name, &format_status(&without_notice), width) {
        return s;
    }

    segments
        .iter()
        .find_map(|seg| match seg {
            StatusSegment::Position { line_1, col_1 } => Some(format!("{line_1}:{col_1}")),
            _ => None,
        })
        .unwrap_or_default()
}

/// `name` cut to whatever `width` leaves after `rest`, if at least one
/// character of it survives.
fn shorten_name(name: &str, rest: &str, width: usize) -> Option<String> {
    let budget = width.checked_sub(rest.chars().count())?;
    let name_len = name.chars().count();
    if name_len <= budget {
        return Some(format!("{name}{rest}"));
    }
    if budget < 2 {
        return None;
    }
    let mut s: String = name.chars().take(budget - 1).collect();
    s.push(ELLIPSIS);
    s.push_str(rest);
    Some(s)
}

pub fn build_status(ctx: &StatusContext<'_>, width: usize) -> String {
    fit_status(&compose_status(ctx), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx<'a>(file: Option<&'a Path>, dirty: bool, notice: Option<&'a str>) -> StatusContext<'a> {
        StatusContext {
            file_name: file,
            dirty,
            line: 2,
            col: 4,
            notice,
        }
    }

    #[test]
    fn clean_named_file() {
        let p = Path::new("/tmp/dir/notes.txt");
        assert_eq!(build_status(&ctx(Some(p), false, None), 80), "notes.txt | 3:5");
    }

    #[test]
    fn dirty_marker() {
        let p = Path::new("notes.txt");
        assert_eq!(build_status(&ctx(Some(p), true, None), 80), "notes.txt [*] | 3:5");
    }

    #[test]
    fn untitled_when_unbound() {
        assert_eq!(build_status(&ctx(None, true, None), 80), "untitled [*] | 3:5");
    }

    #[test]
    fn notice_appended() {
        let p = Path::new("a.txt");
        assert_eq!(
            build_status(&ctx(Some(p), true, Some("save failed")), 80),
            "a.txt [*] | 3:5 | save failed"
        );
    }

    #[test]
    fn segment_order() {
        let p = Path::new("a.txt");
        let c = ctx(Some(p), true, Some("x"));
        let segs = compose_status(&c);
        assert!(matches!(segs[0], StatusSegment::FileName(_)));
        assert_eq!(segs[1], StatusSegment::Dirty);
        assert_eq!(segs[2], StatusSegment::Position { line_1: 3, col_1: 5 });
        assert_eq!(segs[3], StatusSegment::Notice("x"));
    }

    #[test]
    fn narrow_width_shortens_name_before_position() {
        let p = Path::new("a_rather_long_name.txt");
        assert_eq!(build_status(&ctx(Some(p), false, None), 12), "a_rat~ | 3:5");
        assert_eq!(build_status(&ctx(None, false, None), 10), "unt~ | 3:5");
    }

    #[test]
    fn notice_dropped_when_name_cannot_shrink_further() {
        let p = Path::new("notes.txt");
        let c = ctx(Some(p), true, Some("save failed"));
        assert_eq!(build_status(&c, 20), "notes.txt [*] | 3:5");
        assert_eq!(build_status(&c, 12), "n~ [*] | 3:5");
        assert_eq!(build_status(&c, 33), "notes.txt [*] | 3:5 | save failed");
    }

    #[test]
    fn tiny_width_keeps_only_position() {
        let c = ctx(Some(Path::new("notes.txt")), true, None);
        assert_eq!(build_status(&c, 5), "3:5");
        assert_eq!(build_status(&c, 0), "3:5");
    }
}
