use std::fmt;

use serde::Serialize;

/// One comparison unit: a single line of input text.
///
/// A `Line` borrows from the caller's input. `raw` is the original text
/// including its terminator (`\n` or `\r\n`) and is what renderers display.
/// `key` is what the matcher compares; it is always a suffix of `raw`, equal
/// to `raw` unless leading characters were stripped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Line<'a> {
    raw: &'a str,
    key: &'a str,
}

impl<'a> Line<'a> {
    /// Build a line, stripping `strip` characters from the start of the key.
    pub fn new(raw: &'a str, strip: Option<&[char]>) -> Self {
        let key = match strip {
            Some(chars) if !chars.is_empty() => raw.trim_start_matches(chars),
            _ => raw,
        };
        Self { raw, key }
    }

    /// A line whose key is its raw text.
    pub fn plain(raw: &'a str) -> Self {
        Self { raw, key: raw }
    }

    /// The original text, terminator included.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The comparison key.
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// The original text without its terminator.
    pub fn text(&self) -> &'a str {
        strip_terminator(self.raw)
    }

    /// The comparison key without its terminator.
    pub fn key_text(&self) -> &'a str {
        strip_terminator(self.key)
    }

    /// Byte offset of the key within the raw text.
    pub fn key_offset(&self) -> usize {
        self.raw.len() - self.key.len()
    }

    /// Returns `true` if the line ends with `\n`.
    pub fn has_terminator(&self) -> bool {
        self.raw.ends_with('\n')
    }
}

impl fmt::Debug for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.len() == self.key.len() {
            write!(f, "Line({:?})", self.raw)
        } else {
            write!(f, "Line({:?} key={:?})", self.raw, self.key)
        }
    }
}

fn strip_terminator(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WS: &[char] = &[' ', '\t'];

    #[test]
    fn plain_line_key_is_raw() {
        let line = Line::plain("  hello\n");
        assert_eq!(line.key(), "  hello\n");
        assert_eq!(line.key_offset(), 0);
    }

    #[test]
    fn strip_only_affects_key() {
        let line = Line::new(" \t hello world\n", Some(WS));
        assert_eq!(line.raw(), " \t hello world\n");
        assert_eq!(line.key(), "hello world\n");
        assert_eq!(line.key_offset(), 3);
    }

    #[test]
    fn strip_leaves_interior_and_trailing() {
        let line = Line::new("  a  b  \n", Some(WS));
        assert_eq!(line.key(), "a  b  \n");
    }

    #[test]
    fn empty_strip_set_is_noop() {
        let line = Line::new("  x", Some(&[]));
        assert_eq!(line.key(), "  x");
    }

    #[test]
    fn text_drops_terminators() {
        assert_eq!(Line::plain("abc\n").text(), "abc");
        assert_eq!(Line::plain("abc\r\n").text(), "abc");
        assert_eq!(Line::plain("abc").text(), "abc");
        assert_eq!(Line::new("  abc\r\n", Some(WS)).key_text(), "abc");
    }

    #[test]
    fn terminator_detection() {
        assert!(Line::plain("a\n").has_terminator());
        assert!(Line::plain("a\r\n").has_terminator());
        assert!(!Line::plain("a").has_terminator());
    }

    #[test]
    fn lines_compare_by_raw_and_key() {
        let a = Line::new("  foo\n", Some(WS));
        let b = Line::plain("foo\n");
        assert_eq!(a.key(), b.key());
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_as_struct() {
        let json = serde_json::to_value(Line::new(" x\n", Some(WS))).unwrap();
        assert_eq!(json["raw"], " x\n");
        assert_eq!(json["key"], "x\n");
    }
}
