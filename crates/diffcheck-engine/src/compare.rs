//! The comparison entry point: normalize, guard, match.

use diffcheck_types::{Line, OpKind, Opcode};
use serde::Serialize;
use tracing::debug;

use crate::config::{Algorithm, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::group::{group_opcodes, GroupedOpcodes};
use crate::matcher::diff_lines;
use crate::normalize::normalize;
use crate::similarity::similarity;

/// The result of comparing two texts.
///
/// Holds both line sequences and the opcodes relating them. Lines borrow from
/// the input strings; nothing outlives the caller's data.
#[derive(Clone, Debug)]
pub struct Comparison<'a> {
    left: Vec<Line<'a>>,
    right: Vec<Line<'a>>,
    opcodes: Vec<Opcode>,
    algorithm: Algorithm,
    deadline_exceeded: bool,
}

impl<'a> Comparison<'a> {
    /// Compare `left` against `right`.
    ///
    /// Fails only when the combined input exceeds
    /// [`EngineConfig::max_input_bytes`].
    pub fn new(left: &'a str, right: &'a str, config: &EngineConfig) -> EngineResult<Self> {
        let size = left.len() + right.len();
        if size > config.max_input_bytes {
            return Err(EngineError::InputTooLarge {
                size,
                limit: config.max_input_bytes,
            });
        }

        let deadline = config.deadline();
        let left = normalize(left, config.strip_set());
        let right = normalize(right, config.strip_set());
        let matched = diff_lines(config.algorithm, &left, &right, deadline);

        debug!(
            left = left.len(),
            right = right.len(),
            opcodes = matched.opcodes.len(),
            strip = config.strips_leading(),
            "comparison computed"
        );

        Ok(Self {
            left,
            right,
            opcodes: matched.opcodes,
            algorithm: config.algorithm,
            deadline_exceeded: matched.deadline_exceeded,
        })
    }

    /// Compare with the default configuration.
    pub fn with_defaults(left: &'a str, right: &'a str) -> EngineResult<Self> {
        Self::new(left, right, &EngineConfig::default())
    }

    pub fn left(&self) -> &[Line<'a>] {
        &self.left
    }

    pub fn right(&self) -> &[Line<'a>] {
        &self.right
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns `true` if the matcher ran out of time.
    pub fn deadline_exceeded(&self) -> bool {
        self.deadline_exceeded
    }

    /// Returns `true` if both sides have the same comparison keys.
    ///
    /// Two empty inputs are identical.
    pub fn is_identical(&self) -> bool {
        self.left.len() == self.right.len()
            && self
                .left
                .iter()
                .zip(&self.right)
                .all(|(l, r)| l.key() == r.key())
    }

    /// Similarity ratio in `[0, 1]`.
    pub fn similarity(&self) -> f64 {
        similarity(&self.opcodes, self.left.len(), self.right.len())
    }

    /// Hunks with `context` unchanged lines around each change.
    pub fn grouped(&self, context: usize) -> GroupedOpcodes {
        group_opcodes(&self.opcodes, context)
    }

    /// Summary metrics for display.
    pub fn stats(&self) -> Stats {
        let count = |kind: OpKind, side: fn(&Opcode) -> usize| -> usize {
            self.opcodes
                .iter()
                .filter(|op| op.kind == kind)
                .map(side)
                .sum()
        };
        let replaced_left = count(OpKind::Replace, Opcode::left_len);
        let replaced_right = count(OpKind::Replace, Opcode::right_len);

        Stats {
            left_lines: self.left.len(),
            right_lines: self.right.len(),
            equal_lines: count(OpKind::Equal, Opcode::left_len),
            deleted_lines: count(OpKind::Delete, Opcode::left_len) + replaced_left,
            inserted_lines: count(OpKind::Insert, Opcode::right_len) + replaced_right,
            similarity: self.similarity(),
            identical: self.is_identical(),
        }
    }
}

/// Line counts and similarity for a comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    /// Number of lines on the left.
    pub left_lines: usize,
    /// Number of lines on the right.
    pub right_lines: usize,
    /// Lines matched on both sides.
    pub equal_lines: usize,
    /// Left lines removed or replaced.
    pub deleted_lines: usize,
    /// Right lines added or replacing left lines.
    pub inserted_lines: usize,
    /// See [`Comparison::similarity`].
    pub similarity: f64,
    /// See [`Comparison::is_identical`].
    pub identical: bool,
}
