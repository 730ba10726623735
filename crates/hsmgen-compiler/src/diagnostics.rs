//! Snippet rendering for syntax errors.
//!
//! Errors carry 1-based line numbers; this module maps them back to byte
//! spans in the original source and renders a caret-annotated snippet.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::Error;

/// Render `error` against the chart text it came from.
///
/// Errors without a source position (e.g. an unsupported language) render as
/// a plain one-line message.
pub fn render_error(error: &Error, source: &str, path: Option<&str>, colored: bool) -> String {
    let title = error.to_string();
    let Some(line) = error.line() else {
        return format!("error: {title}");
    };
    let Some(range) = line_span(source, line) else {
        return format!("error: {title}");
    };

    let mut snippet = Snippet::source(source)
        .line_start(1)
        .annotation(AnnotationKind::Primary.span(range).label("here"));
    if let Some(path) = path {
        snippet = snippet.path(path);
    }

    let report: Vec<Group> = vec![Level::ERROR.primary_title(&title).element(snippet)];
    let renderer = if colored {
        Renderer::styled()
    } else {
        Renderer::plain()
    };
    renderer.render(&report)
}

/// Byte range of the (1-based) line's trimmed content.
fn line_span(source: &str, line_no: usize) -> Option<std::ops::Range<usize>> {
    let mut offset = 0;
    for (idx, raw) in source.lines().enumerate() {
        if idx + 1 == line_no {
            let trimmed_start = raw.len() - raw.trim_start().len();
            let trimmed = raw.trim();
            let start = offset + trimmed_start;
            let end = (start + trimmed.len()).max(start + 1).min(source.len());
            return Some(start..end);
        }
        offset += raw.len() + 1;
    }
    None
}
