//! Hunk grouping: splitting an edit script into change regions with bounded
//! context.
//!
//! A group is a run of opcodes in which no two changes are separated by more
//! than `2 * context` unchanged units. Unchanged runs at the edges of a group
//! are trimmed to `context` units. Scripts without changes yield no groups.
//! The grouping itself is `similar::group_diff_ops`.

use std::ops::Range;
use std::vec;

use diffcheck_types::Opcode;

use crate::matcher::{from_diff_op, to_diff_op};

/// Group `opcodes` into hunks keeping `context` unchanged units around each
/// change.
pub fn group_opcodes(opcodes: &[Opcode], context: usize) -> GroupedOpcodes {
    GroupedOpcodes::new(opcodes, context)
}

/// Iterator over opcode groups. See [`group_opcodes`].
#[derive(Clone, Debug)]
pub struct GroupedOpcodes {
    groups: vec::IntoIter<Vec<Opcode>>,
}

impl GroupedOpcodes {
    pub fn new(opcodes: &[Opcode], context: usize) -> Self {
        let groups = if opcodes.iter().any(Opcode::is_change) {
            let ops = opcodes.iter().map(to_diff_op).collect();
            similar::group_diff_ops(ops, context)
                .iter()
                .map(|group| group.iter().map(from_diff_op).collect::<Vec<_>>())
                .filter(|group| group.iter().any(Opcode::is_change))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            groups: groups.into_iter(),
        }
    }
}

impl Iterator for GroupedOpcodes {
    type Item = Vec<Opcode>;

    fn next(&mut self) -> Option<Vec<Opcode>> {
        self.groups.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.groups.size_hint()
    }
}

/// The left and right ranges spanned by a group.
pub fn group_span(group: &[Opcode]) -> Option<(Range<usize>, Range<usize>)> {
    let first = group.first()?;
    let last = group.last()?;
    Some((
        first.left.start..last.left.end,
        first.right.start..last.right.end,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffcheck_types::OpKind;

    fn replace(l: Range<usize>, r: Range<usize>) -> Opcode {
        Opcode::new(OpKind::Replace, l, r)
    }

    #[test]
    fn no_changes_no_groups() {
        let ops = vec![Opcode::equal(0..10, 0..10)];
        assert_eq!(group_opcodes(&ops, 3).count(), 0);
        assert_eq!(group_opcodes(&[], 3).count(), 0);
    }

    #[test]
    fn unmerged_equals_form_no_group() {
        let ops = vec![Opcode::equal(0..10, 0..10), Opcode::equal(10..20, 10..20)];
        assert_eq!(group_opcodes(&ops, 2).count(), 0);
    }

    #[test]
    fn small_script_is_one_group() {
        let ops = vec![
            Opcode::equal(0..1, 0..1),
            replace(1..2, 1..2),
            Opcode::equal(2..3, 2..3),
        ];
        let groups: Vec<_> = group_opcodes(&ops, 3).collect();
        assert_eq!(groups, vec![ops]);
    }

    #[test]
    fn edges_are_trimmed_to_context() {
        let ops = vec![
            Opcode::equal(0..10, 0..10),
            replace(10..11, 10..11),
            Opcode::equal(11..20, 11..20),
        ];
        let groups: Vec<_> = group_opcodes(&ops, 3).collect();
        assert_eq!(
            groups,
            vec![vec![
                Opcode::equal(7..10, 7..10),
                replace(10..11, 10..11),
                Opcode::equal(11..14, 11..14),
            ]]
        );
        assert_eq!(group_span(&groups[0]), Some((7..14, 7..14)));
    }

    #[test]
    fn distant_changes_split() {
        let ops = vec![
            replace(0..1, 0..1),
            Opcode::equal(1..10, 1..10),
            replace(10..11, 10..11),
        ];
        let groups: Vec<_> = group_opcodes(&ops, 2).collect();
        assert_eq!(
            groups,
            vec![
                vec![replace(0..1, 0..1), Opcode::equal(1..3, 1..3)],
                vec![Opcode::equal(8..10, 8..10), replace(10..11, 10..11)],
            ]
        );
    }

    #[test]
    fn close_changes_stay_together() {
        // a gap of exactly 2 * context does not split
        let ops = vec![
            replace(0..1, 0..1),
            Opcode::equal(1..5, 1..5),
            replace(5..6, 5..6),
        ];
        assert_eq!(group_opcodes(&ops, 2).count(), 1);
    }

    #[test]
    fn zero_context_keeps_only_changes() {
        let ops = vec![
            Opcode::equal(0..1, 0..1),
            Opcode::new(OpKind::Insert, 1..1, 1..2),
        ];
        let groups: Vec<_> = group_opcodes(&ops, 0).collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(group_span(&groups[0]), Some((1..1, 1..2)));
    }

    #[test]
    fn offsets_differ_between_sides() {
        let ops = vec![
            Opcode::new(OpKind::Insert, 0..0, 0..2),
            Opcode::equal(0..8, 2..10),
            Opcode::new(OpKind::Delete, 8..9, 10..10),
        ];
        let groups: Vec<_> = group_opcodes(&ops, 1).collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(group_span(&groups[0]), Some((0..1, 0..3)));
        assert_eq!(group_span(&groups[1]), Some((7..9, 9..10)));
    }
}
