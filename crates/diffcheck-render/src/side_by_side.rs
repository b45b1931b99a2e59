//! Side-by-side table output.
//!
//! Each row pairs a left cell with a right cell. Replaced regions are paired
//! positionally, and the shorter side is padded with empty cells. With a
//! context window, unchanged runs between hunks collapse into a single
//! [`Row::Elided`] marker.

use std::ops::Range;

use diffcheck_engine::{group_span, Comparison, Line, OpKind, Opcode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::intraline::intraline_spans;

/// Options for [`render_side_by_side`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideBySideOptions {
    /// Unchanged lines shown around each change. `None` shows everything.
    pub context: Option<usize>,
    /// Compute changed character spans for replaced pairs.
    pub intraline: bool,
}

impl Default for SideBySideOptions {
    fn default() -> Self {
        Self {
            context: Some(3),
            intraline: true,
        }
    }
}

/// One populated side of a row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell<'a> {
    /// 1-based line number.
    pub line_no: usize,
    /// Display text without the line terminator.
    pub text: &'a str,
    pub kind: OpKind,
    /// Byte ranges of `text` to emphasize.
    pub highlights: Vec<Range<usize>>,
}

/// One table row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Row<'a> {
    /// A line pair; either side may be empty.
    Line {
        left: Option<Cell<'a>>,
        right: Option<Cell<'a>>,
    },
    /// Unchanged lines hidden between two hunks.
    Elided {
        left: Range<usize>,
        right: Range<usize>,
    },
}

impl<'a> Row<'a> {
    /// Returns `true` for line rows that are not unchanged.
    pub fn is_change(&self) -> bool {
        match self {
            Row::Line { left, right } => left
                .iter()
                .chain(right.iter())
                .any(|cell| cell.kind != OpKind::Equal),
            Row::Elided { .. } => false,
        }
    }

    pub fn left(&self) -> Option<&Cell<'a>> {
        match self {
            Row::Line { left, .. } => left.as_ref(),
            Row::Elided { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&Cell<'a>> {
        match self {
            Row::Line { right, .. } => right.as_ref(),
            Row::Elided { .. } => None,
        }
    }
}

/// A rendered side-by-side table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SideBySide<'a> {
    pub rows: Vec<Row<'a>>,
}

impl<'a> SideBySide<'a> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row<'a>> {
        self.rows.iter()
    }

    /// Returns `true` if any row shows a change.
    pub fn has_changes(&self) -> bool {
        self.rows.iter().any(Row::is_change)
    }
}

impl<'t, 'a> IntoIterator for &'t SideBySide<'a> {
    type Item = &'t Row<'a>;
    type IntoIter = std::slice::Iter<'t, Row<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Render a comparison as a side-by-side table.
pub fn render_side_by_side<'a>(
    comparison: &Comparison<'a>,
    options: &SideBySideOptions,
) -> SideBySide<'a> {
    let mut table = TableBuilder {
        left: comparison.left(),
        right: comparison.right(),
        intraline: options.intraline,
        rows: Vec::new(),
    };

    match options.context {
        None => {
            for op in comparison.opcodes() {
                table.push_opcode(op);
            }
        }
        Some(context) => {
            let mut previous: Option<(usize, usize)> = None;
            for group in comparison.grouped(context) {
                let Some((left_span, right_span)) = group_span(&group) else {
                    continue;
                };
                if let Some((left_end, right_end)) = previous {
                    table.rows.push(Row::Elided {
                        left: left_end..left_span.start,
                        right: right_end..right_span.start,
                    });
                }
                for op in &group {
                    table.push_opcode(op);
                }
                previous = Some((left_span.end, right_span.end));
            }
        }
    }

    debug!(rows = table.rows.len(), "rendered side-by-side table");
    SideBySide { rows: table.rows }
}

struct TableBuilder<'c, 'a> {
    left: &'c [Line<'a>],
    right: &'c [Line<'a>],
    intraline: bool,
    rows: Vec<Row<'a>>,
}

impl<'a> TableBuilder<'_, 'a> {
    fn push_opcode(&mut self, op: &Opcode) {
        match op.kind {
            OpKind::Equal => {
                for (i, j) in op.left.clone().zip(op.right.clone()) {
                    let left = cell(self.left, i, OpKind::Equal);
                    let right = cell(self.right, j, OpKind::Equal);
                    self.push(Some(left), Some(right));
                }
            }
            OpKind::Delete => {
                for i in op.left.clone() {
                    let left = cell(self.left, i, OpKind::Delete);
                    self.push(Some(left), None);
                }
            }
            OpKind::Insert => {
                for j in op.right.clone() {
                    let right = cell(self.right, j, OpKind::Insert);
                    self.push(None, Some(right));
                }
            }
            OpKind::Replace => {
                for k in 0..op.left_len().max(op.right_len()) {
                    let i = (k < op.left_len()).then_some(op.left.start + k);
                    let j = (k < op.right_len()).then_some(op.right.start + k);
                    let mut left = i.map(|i| cell(self.left, i, OpKind::Replace));
                    let mut right = j.map(|j| cell(self.right, j, OpKind::Replace));

                    if let (true, Some(i), Some(j), Some(l), Some(r)) =
                        (self.intraline, i, j, left.as_mut(), right.as_mut())
                    {
                        if let Some(spans) = intraline_spans(&self.left[i], &self.right[j]) {
                            l.highlights = spans.left;
                            r.highlights = spans.right;
                        }
                    }
                    self.push(left, right);
                }
            }
        }
    }

    fn push(&mut self, left: Option<Cell<'a>>, right: Option<Cell<'a>>) {
        self.rows.push(Row::Line { left, right });
    }
}

fn cell<'a>(lines: &[Line<'a>], index: usize, kind: OpKind) -> Cell<'a> {
    Cell {
        line_no: index + 1,
        text: lines[index].text(),
        kind,
        highlights: Vec::new(),
    }
}
