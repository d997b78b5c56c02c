//! Plain-text presentation helpers

use std::borrow::Cow;

use textwrap::{Options, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

/// Width of the horizontal rules framing every report.
pub const RULE_WIDTH: usize = 60;

pub const MARK_OK: &str = "✓";
pub const MARK_FAIL: &str = "✗";

const TAB: &str = "    ";

/// A horizontal rule line.
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Marker for a check that did (`true`) or did not hold.
pub fn mark(ok: bool) -> &'static str {
    if ok {
        MARK_OK
    } else {
        MARK_FAIL
    }
}

/// Wrap `text` into lines no wider than `width` display columns.
///
/// Hard line breaks are kept and blank lines survive as empty lines.
/// Continuation lines keep the leading indentation of their source line so
/// numbered steps stay aligned.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for source in text.lines() {
        let source = source.replace('\t', TAB);
        let source = source.trim_end();
        if source.is_empty() {
            out.push(String::new());
            continue;
        }

        let body = source.trim_start();
        let indent = &source[..source.len() - body.len()];
        // Never let indentation eat the whole line
        let indent = if display_width(indent) * 2 > width {
            ""
        } else {
            indent
        };

        let options = Options::new(width)
            .initial_indent(indent)
            .subsequent_indent(indent)
            .wrap_algorithm(WrapAlgorithm::FirstFit);
        out.extend(textwrap::wrap(body, options).into_iter().map(Cow::into_owned));
    }

    out
}

/// Display width of `s` in terminal columns.
pub fn display_width(s: &str) -> usize {
    s.width()
}
