//! Similarity ratios derived from matcher output.

use diffcheck_types::{OpKind, Opcode};

use crate::config::Algorithm;
use crate::matcher::diff_slices;

/// `2 * M / T`, where `M` counts units covered by `Equal` opcodes and `T`
/// is the combined length of both sequences. Two empty sequences score `1.0`.
pub fn similarity(opcodes: &[Opcode], left_len: usize, right_len: usize) -> f64 {
    let total = left_len + right_len;
    if total == 0 {
        return 1.0;
    }
    let matched: usize = opcodes
        .iter()
        .filter(|op| op.kind == OpKind::Equal)
        .map(Opcode::left_len)
        .sum();
    2.0 * matched as f64 / total as f64
}

/// Character-level similarity of two strings, using the greedy matcher.
pub fn char_similarity(a: &str, b: &str) -> f64 {
    let left: Vec<char> = a.chars().collect();
    let right: Vec<char> = b.chars().collect();
    let matched = diff_slices(Algorithm::Greedy, &left, &right, None);
    similarity(&matched.opcodes, left.len(), right.len())
}
