use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// The kind of an edit step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    /// Both ranges hold matching units.
    Equal,
    /// Units present only on the right.
    Insert,
    /// Units present only on the left.
    Delete,
    /// Left units replaced by right units.
    Replace,
}

impl OpKind {
    /// The kind describing a changed region with the given range lengths.
    ///
    /// Returns `None` when both lengths are zero.
    pub fn for_change(left_len: usize, right_len: usize) -> Option<Self> {
        match (left_len, right_len) {
            (0, 0) => None,
            (_, 0) => Some(Self::Delete),
            (0, _) => Some(Self::Insert),
            _ => Some(Self::Replace),
        }
    }

    /// Single-word label used in text output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of an edit script.
///
/// Ranges are half-open index intervals into the left and right sequences.
/// An opcode never copies the units it refers to.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opcode {
    pub kind: OpKind,
    pub left: Range<usize>,
    pub right: Range<usize>,
}

impl Opcode {
    pub fn new(kind: OpKind, left: Range<usize>, right: Range<usize>) -> Self {
        Self { kind, left, right }
    }

    pub fn equal(left: Range<usize>, right: Range<usize>) -> Self {
        debug_assert_eq!(left.len(), right.len());
        Self::new(OpKind::Equal, left, right)
    }

    /// Returns `true` for anything but [`OpKind::Equal`].
    pub fn is_change(&self) -> bool {
        self.kind != OpKind::Equal
    }

    /// Returns `true` if both ranges are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn left_len(&self) -> usize {
        self.left.len()
    }

    pub fn right_len(&self) -> usize {
        self.right.len()
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({}..{}/{}..{})",
            self.kind, self.left.start, self.left.end, self.right.start, self.right.end
        )
    }
}
