//! Character-level highlighting inside a replaced line pair.

use std::ops::Range;

use diffcheck_engine::{diff_slices, Algorithm, Line};
use serde::Serialize;

/// Changed byte ranges within each line's display text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IntralineSpans {
    pub left: Vec<Range<usize>>,
    pub right: Vec<Range<usize>>,
}

/// Find the character runs that differ between two lines.
///
/// The comparison keys (without terminators) are matched character by
/// character. Returned ranges are byte offsets into [`Line::text`], so a
/// stripped indent is never highlighted. Returns `None` if either key is
/// empty.
pub fn intraline_spans(left: &Line<'_>, right: &Line<'_>) -> Option<IntralineSpans> {
    let (left_key, right_key) = (left.key_text(), right.key_text());
    if left_key.is_empty() || right_key.is_empty() {
        return None;
    }

    let (left_chars, left_offsets) = chars_with_offsets(left_key);
    let (right_chars, right_offsets) = chars_with_offsets(right_key);
    let matched = diff_slices(Algorithm::Greedy, &left_chars, &right_chars, None);

    let (left_base, right_base) = (left.key_offset(), right.key_offset());
    let mut spans = IntralineSpans::default();
    for op in matched.opcodes.iter().filter(|op| op.is_change()) {
        if !op.left.is_empty() {
            spans
                .left
                .push(left_base + left_offsets[op.left.start]..left_base + left_offsets[op.left.end]);
        }
        if !op.right.is_empty() {
            spans
                .right
                .push(right_base + right_offsets[op.right.start]..right_base + right_offsets[op.right.end]);
        }
    }
    Some(spans)
}

/// Characters of `s` and their byte offsets, plus a trailing `s.len()`.
fn chars_with_offsets(s: &str) -> (Vec<char>, Vec<usize>) {
    let (mut offsets, chars): (Vec<usize>, Vec<char>) = s.char_indices().unzip();
    offsets.push(s.len());
    (chars, offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_character_change() {
        let spans = intraline_spans(&Line::plain("foo bar\n"), &Line::plain("foo baz\n")).unwrap();
        assert_eq!(spans.left, vec![6..7]);
        assert_eq!(spans.right, vec![6..7]);
    }

    #[test]
    fn insertion_only_marks_one_side() {
        let spans = intraline_spans(&Line::plain("ab\n"), &Line::plain("aXb\n")).unwrap();
        assert!(spans.left.is_empty());
        assert_eq!(spans.right, vec![1..2]);
    }

    #[test]
    fn disjoint_lines_are_fully_marked() {
        let spans = intraline_spans(&Line::plain("abc"), &Line::plain("xy")).unwrap();
        assert_eq!(spans.left, vec![0..3]);
        assert_eq!(spans.right, vec![0..2]);
    }

    #[test]
    fn offsets_skip_stripped_indent() {
        let ws: &[char] = &[' ', '\t'];
        let left = Line::new("    x = 1\n", Some(ws));
        let right = Line::new("x = 2\n", Some(ws));
        let spans = intraline_spans(&left, &right).unwrap();
        assert_eq!(spans.left, vec![8..9]);
        assert_eq!(spans.right, vec![4..5]);
        assert_eq!(&left.text()[8..9], "1");
    }

    #[test]
    fn multibyte_offsets() {
        let spans = intraline_spans(&Line::plain("café\n"), &Line::plain("cafe\n")).unwrap();
        assert_eq!(spans.left, vec![3..5]);
        assert_eq!(spans.right, vec![3..4]);
    }

    #[test]
    fn empty_keys_are_skipped() {
        assert!(intraline_spans(&Line::plain("\n"), &Line::plain("x\n")).is_none());
        assert!(intraline_spans(&Line::plain("x\r\n"), &Line::plain("")).is_none());
    }
}
