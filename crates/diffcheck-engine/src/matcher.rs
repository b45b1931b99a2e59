//! Edit script computation.
//!
//! The default [`Algorithm::Greedy`] strategy repeatedly extracts the longest
//! contiguous run shared by both sides of a region, then handles the
//! unmatched regions before and after it. Regions left over between matched
//! runs become `Insert`, `Delete` or `Replace` opcodes. Myers and Patience
//! are delegated to `similar`; only the equal runs of its script are kept
//! and the changes between them are rebuilt here.

use std::collections::HashMap;
use std::hash::Hash;
use std::iter;
use std::mem;
use std::ops::Range;
use std::time::Instant;

use diffcheck_types::{Line, OpKind, Opcode};
use similar::{DiffOp, DiffTag};
use tracing::{debug, warn};

use crate::config::Algorithm;

/// The outcome of a matcher run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Matched {
    /// Opcodes covering both sequences end to end.
    pub opcodes: Vec<Opcode>,
    /// `true` if the deadline passed before matching finished. The opcodes
    /// are still a valid script, only coarser.
    ///
    /// `similar` does not say whether it cut its search short, so for Myers
    /// and Patience this is set whenever the deadline has passed by the time
    /// the run returns. A run that completed just after the deadline is
    /// reported as exceeded too.
    pub deadline_exceeded: bool,
}

/// Compute opcodes between two line sequences, comparing keys only.
pub fn diff_lines(
    algorithm: Algorithm,
    left: &[Line<'_>],
    right: &[Line<'_>],
    deadline: Option<Instant>,
) -> Matched {
    let left_keys: Vec<&str> = left.iter().map(Line::key).collect();
    let right_keys: Vec<&str> = right.iter().map(Line::key).collect();
    diff_slices(algorithm, &left_keys, &right_keys, deadline)
}

/// Compute opcodes between two arbitrary sequences.
pub fn diff_slices<T: Hash + Ord>(
    algorithm: Algorithm,
    left: &[T],
    right: &[T],
    deadline: Option<Instant>,
) -> Matched {
    let matched = match algorithm.to_similar() {
        None => {
            let (blocks, deadline_exceeded) =
                BlockMatcher::new(left, right).matching_blocks(deadline);
            Matched {
                opcodes: blocks_to_opcodes(&blocks, left.len(), right.len()),
                deadline_exceeded,
            }
        }
        Some(alg) => {
            let ops = similar::capture_diff_slices_deadline(alg, left, right, deadline);
            let blocks = equal_blocks(&ops, left, right);
            Matched {
                opcodes: blocks_to_opcodes(&blocks, left.len(), right.len()),
                deadline_exceeded: expired(deadline),
            }
        }
    };

    if matched.deadline_exceeded {
        warn!(
            %algorithm,
            left = left.len(),
            right = right.len(),
            "matching deadline exceeded; remaining regions reported as replaced"
        );
    } else {
        debug!(%algorithm, opcodes = matched.opcodes.len(), "sequences matched");
    }
    matched
}

/// Normalize an opcode stream.
///
/// Empty opcodes are dropped, adjacent `Equal` opcodes are merged, and every
/// run of adjacent changes is merged into one opcode whose kind follows from
/// its range lengths, so a delete next to an insert becomes a `Replace`.
pub fn compact(opcodes: impl IntoIterator<Item = Opcode>) -> Vec<Opcode> {
    let mut out: Vec<Opcode> = Vec::new();
    for mut op in opcodes {
        if op.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last)
                if last.is_change() == op.is_change()
                    && last.left.end == op.left.start
                    && last.right.end == op.right.start =>
            {
                last.left.end = op.left.end;
                last.right.end = op.right.end;
                if let Some(kind) = change_kind(last) {
                    last.kind = kind;
                }
            }
            _ => {
                if let Some(kind) = change_kind(&op) {
                    op.kind = kind;
                }
                out.push(op);
            }
        }
    }
    out
}

fn change_kind(op: &Opcode) -> Option<OpKind> {
    if op.is_change() {
        OpKind::for_change(op.left_len(), op.right_len())
    } else {
        None
    }
}

fn expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

/// Keep the `Equal` runs of a `similar` script that advance monotonically on
/// both sides and really are equal. Everything between them is rebuilt by
/// [`blocks_to_opcodes`], so the result covers both sequences without gaps
/// whatever ranges the other ops carried.
fn equal_blocks<T: PartialEq>(ops: &[DiffOp], left: &[T], right: &[T]) -> Vec<Block> {
    let (mut i, mut j) = (0, 0);
    let mut blocks = Vec::new();
    for op in ops {
        let DiffOp::Equal {
            old_index,
            new_index,
            len,
        } = *op
        else {
            continue;
        };
        let (left_end, right_end) = (old_index + len, new_index + len);
        if len == 0
            || old_index < i
            || new_index < j
            || left_end > left.len()
            || right_end > right.len()
            || left[old_index..left_end] != right[new_index..right_end]
        {
            continue;
        }
        blocks.push(Block {
            left: old_index,
            right: new_index,
            len,
        });
        i = left_end;
        j = right_end;
    }
    merge_adjacent(blocks)
}

fn kind_of(tag: DiffTag) -> OpKind {
    match tag {
        DiffTag::Equal => OpKind::Equal,
        DiffTag::Delete => OpKind::Delete,
        DiffTag::Insert => OpKind::Insert,
        DiffTag::Replace => OpKind::Replace,
    }
}

/// The `similar` op covering the same ranges as `op`.
pub(crate) fn to_diff_op(op: &Opcode) -> DiffOp {
    let (old_index, new_index) = (op.left.start, op.right.start);
    let (old_len, new_len) = (op.left_len(), op.right_len());
    match op.kind {
        OpKind::Equal => DiffOp::Equal {
            old_index,
            new_index,
            len: old_len,
        },
        OpKind::Delete => DiffOp::Delete {
            old_index,
            old_len,
            new_index,
        },
        OpKind::Insert => DiffOp::Insert {
            old_index,
            new_index,
            new_len,
        },
        OpKind::Replace => DiffOp::Replace {
            old_index,
            old_len,
            new_index,
            new_len,
        },
    }
}

pub(crate) fn from_diff_op(op: &DiffOp) -> Opcode {
    let (tag, left, right) = op.as_tag_tuple();
    Opcode::new(kind_of(tag), left, right)
}

/// A run of `len` matching elements starting at `left` and `right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Block {
    left: usize,
    right: usize,
    len: usize,
}

struct BlockMatcher<'a, T> {
    left: &'a [T],
    right: &'a [T],
    /// Positions of every element of `right`, ascending.
    positions: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Hash + Eq> BlockMatcher<'a, T> {
    fn new(left: &'a [T], right: &'a [T]) -> Self {
        let mut positions: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, item) in right.iter().enumerate() {
            positions.entry(item).or_default().push(j);
        }
        Self {
            left,
            right,
            positions,
        }
    }

    /// Longest common run within the given regions.
    ///
    /// Among equally long runs the one starting earliest on the left wins,
    /// then the one starting earliest on the right. Returns a zero-length
    /// block when nothing matches, and `None` if the deadline passes first.
    fn longest_match(
        &self,
        l: Range<usize>,
        r: Range<usize>,
        deadline: Option<Instant>,
    ) -> Option<Block> {
        let mut best = Block {
            left: l.start,
            right: r.start,
            len: 0,
        };
        // runs[k + 1]: length of the match ending at (i - 1, r.start + k).
        // runs[0] stays zero for matches starting at r.start.
        let mut runs = vec![0usize; r.len() + 1];
        let mut next = vec![0usize; r.len() + 1];
        let mut touched: Vec<usize> = Vec::new();
        let mut next_touched: Vec<usize> = Vec::new();

        for i in l {
            if expired(deadline) {
                return None;
            }
            if let Some(positions) = self.positions.get(&self.left[i]) {
                let first = positions.partition_point(|&j| j < r.start);
                for &j in positions[first..].iter().take_while(|&&j| j < r.end) {
                    let k = j - r.start;
                    let len = runs[k] + 1;
                    next[k + 1] = len;
                    next_touched.push(k + 1);
                    if len > best.len {
                        best = Block {
                            left: i + 1 - len,
                            right: j + 1 - len,
                            len,
                        };
                    }
                }
            }
            for k in touched.drain(..) {
                runs[k] = 0;
            }
            mem::swap(&mut runs, &mut next);
            mem::swap(&mut touched, &mut next_touched);
        }
        Some(best)
    }

    /// All matching blocks in ascending order, with adjacent blocks merged.
    fn matching_blocks(&self, deadline: Option<Instant>) -> (Vec<Block>, bool) {
        let mut blocks = Vec::new();
        let mut exceeded = false;
        let mut pending = vec![(0..self.left.len(), 0..self.right.len())];

        while let Some((l, r)) = pending.pop() {
            if l.is_empty() || r.is_empty() {
                continue;
            }
            let Some(block) = self.longest_match(l.clone(), r.clone(), deadline) else {
                exceeded = true;
                break;
            };
            if block.len == 0 {
                continue;
            }
            let (left_end, right_end) = (block.left + block.len, block.right + block.len);
            pending.push((l.start..block.left, r.start..block.right));
            pending.push((left_end..l.end, right_end..r.end));
            blocks.push(block);
        }

        blocks.sort_unstable();
        (merge_adjacent(blocks), exceeded)
    }
}

fn merge_adjacent(blocks: Vec<Block>) -> Vec<Block> {
    let mut merged: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last)
                if last.left + last.len == block.left && last.right + last.len == block.right =>
            {
                last.len += block.len;
            }
            _ => merged.push(block),
        }
    }
    merged
}

fn blocks_to_opcodes(blocks: &[Block], left_len: usize, right_len: usize) -> Vec<Opcode> {
    let sentinel = Block {
        left: left_len,
        right: right_len,
        len: 0,
    };
    let mut ops = Vec::with_capacity(blocks.len() * 2 + 1);
    let (mut i, mut j) = (0, 0);
    for block in blocks.iter().copied().chain(iter::once(sentinel)) {
        if let Some(kind) = OpKind::for_change(block.left - i, block.right - j) {
            ops.push(Opcode::new(kind, i..block.left, j..block.right));
        }
        i = block.left + block.len;
        j = block.right + block.len;
        if block.len > 0 {
            ops.push(Opcode::equal(block.left..i, block.right..j));
        }
    }
    ops
}
