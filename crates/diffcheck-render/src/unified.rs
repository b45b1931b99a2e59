//! Unified diff output.
//!
//! Produces the familiar `---`/`+++`/`@@` text format. Hunk boundaries come
//! from [`diffcheck_engine::group_opcodes`], so the text and the
//! side-by-side table always agree on what is shown.

use std::ops::Range;

use diffcheck_engine::{group_span, Comparison, Line, OpKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Marker emitted after a line that has no terminator.
const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file\n";

/// Options for [`render_unified`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnifiedOptions {
    /// Unchanged lines shown around each change.
    pub context: usize,
    /// Label printed on the `---` line.
    pub left_label: String,
    /// Label printed on the `+++` line.
    pub right_label: String,
    /// Whether to emit `\ No newline at end of file` markers.
    pub missing_newline_hint: bool,
}

impl Default for UnifiedOptions {
    fn default() -> Self {
        Self {
            context: 3,
            left_label: "Text 1".into(),
            right_label: "Text 2".into(),
            missing_newline_hint: true,
        }
    }
}

/// Render a comparison as a unified diff.
///
/// Returns an empty string when there is nothing to show, which callers
/// should read as "no differences".
pub fn render_unified(comparison: &Comparison<'_>, options: &UnifiedOptions) -> String {
    let (left, right) = (comparison.left(), comparison.right());
    let mut out = String::new();
    let mut hunks = 0usize;

    for group in comparison.grouped(options.context) {
        let Some((left_span, right_span)) = group_span(&group) else {
            continue;
        };
        if hunks == 0 {
            out.push_str(&format!("--- {}\n", options.left_label));
            out.push_str(&format!("+++ {}\n", options.right_label));
        }
        hunks += 1;
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(&left_span),
            format_range(&right_span)
        ));

        for op in &group {
            let removed = &left[op.left.clone()];
            let added = &right[op.right.clone()];
            match op.kind {
                OpKind::Equal => push_lines(&mut out, ' ', removed, options),
                OpKind::Delete => push_lines(&mut out, '-', removed, options),
                OpKind::Insert => push_lines(&mut out, '+', added, options),
                OpKind::Replace => {
                    push_lines(&mut out, '-', removed, options);
                    push_lines(&mut out, '+', added, options);
                }
            }
        }
    }

    debug!(hunks, bytes = out.len(), "rendered unified diff");
    out
}

/// `start,count` with a 1-based start; the count is omitted when it is 1.
/// An empty range points at the line before it, with a count of 0.
fn format_range(range: &Range<usize>) -> String {
    match range.len() {
        0 => format!("{},0", range.start),
        1 => format!("{}", range.start + 1),
        len => format!("{},{}", range.start + 1, len),
    }
}

fn push_lines(out: &mut String, prefix: char, lines: &[Line<'_>], options: &UnifiedOptions) {
    for line in lines {
        out.push(prefix);
        out.push_str(line.raw());
        if !line.has_terminator() {
            out.push('\n');
            if options.missing_newline_hint {
                out.push_str(NO_NEWLINE_MARKER);
            }
        }
    }
}
