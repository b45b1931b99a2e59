//! Splitting raw text into comparison units.

use diffcheck_types::Line;

/// Characters stripped when leading whitespace is ignored.
pub const DEFAULT_STRIP: &[char] = &[' ', '\t'];

/// Split `text` into lines, optionally stripping leading characters from
/// each comparison key.
///
/// A line ends after `\n`, so `\r\n` stays together as one terminator. A
/// trailing fragment without a terminator becomes the final line. Empty input
/// yields no lines.
pub fn normalize<'a>(text: &'a str, strip_leading: Option<&[char]>) -> Vec<Line<'a>> {
    text.split_inclusive('\n')
        .map(|raw| Line::new(raw, strip_leading))
        .collect()
}
