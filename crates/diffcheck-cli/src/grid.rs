//! Terminal layout for side-by-side tables.
//!
//! Each side is `NNNNN M text`, where `M` marks the change kind. Text longer
//! than the column width wraps onto continuation lines numbered `>`. Widths
//! are terminal columns, so wide characters count double and tabs expand to
//! [`TAB_WIDTH`] spaces.

use std::ops::Range;

use colored::Colorize;
use diffcheck_engine::OpKind;
use diffcheck_render::{Cell, Row, SideBySide};
use unicode_width::UnicodeWidthChar;

const NUMBER_WIDTH: usize = 5;
const MIN_WIDTH: usize = 8;
const TAB_WIDTH: usize = 4;

pub fn render_grid(table: &SideBySide<'_>, width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let side_width = NUMBER_WIDTH + 3 + width;
    let mut out = String::new();

    for row in table {
        match row {
            Row::Line { left, right } => {
                let left_chunks = chunks(left.as_ref(), width);
                let right_chunks = chunks(right.as_ref(), width);
                for k in 0..left_chunks.len().max(right_chunks.len()) {
                    let l = side(left.as_ref(), left_chunks.get(k), k, width);
                    let r = side(right.as_ref(), right_chunks.get(k), k, width);
                    let line = format!("{l} │ {r}");
                    out.push_str(line.trim_end());
                    out.push('\n');
                }
            }
            Row::Elided { left, right } => {
                let hidden = left.len().max(right.len());
                let note = format!("⋯ {hidden} unchanged lines ⋯");
                let line = format!("{:^w$}", note, w = side_width * 2 + 3);
                out.push_str(&line.trim_end().dimmed().to_string());
                out.push('\n');
            }
        }
    }
    out
}

fn char_width(c: char) -> usize {
    if c == '\t' {
        TAB_WIDTH
    } else {
        c.width().unwrap_or(0)
    }
}

fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Byte ranges splitting a cell's text into pieces at most `width` columns
/// wide.
fn chunks(cell: Option<&Cell<'_>>, width: usize) -> Vec<Range<usize>> {
    let Some(cell) = cell else {
        return Vec::new();
    };
    let text = cell.text;
    let mut pieces = Vec::new();
    let (mut start, mut used) = (0, 0);
    for (offset, c) in text.char_indices() {
        let w = char_width(c);
        if used > 0 && used + w > width {
            pieces.push(start..offset);
            start = offset;
            used = 0;
        }
        used += w;
    }
    pieces.push(start..text.len());
    pieces
}

fn side(cell: Option<&Cell<'_>>, chunk: Option<&Range<usize>>, index: usize, width: usize) -> String {
    let (Some(cell), Some(chunk)) = (cell, chunk) else {
        return " ".repeat(NUMBER_WIDTH + 3 + width);
    };
    let number = if index == 0 {
        format!("{:>w$}", cell.line_no, w = NUMBER_WIDTH)
    } else {
        format!("{:>w$}", ">", w = NUMBER_WIDTH)
    };
    let marker = match cell.kind {
        OpKind::Equal => " ".normal(),
        OpKind::Delete => "-".red(),
        OpKind::Insert => "+".green(),
        OpKind::Replace => "!".yellow(),
    };
    let used = display_width(&cell.text[chunk.clone()]);
    format!(
        "{} {} {}{}",
        number.dimmed(),
        marker,
        paint(cell, chunk.clone()),
        " ".repeat(width.saturating_sub(used))
    )
}

/// Colour a chunk of a cell, emphasizing highlighted spans.
fn paint(cell: &Cell<'_>, chunk: Range<usize>) -> String {
    let mut out = String::new();
    let mut start = chunk.start;
    let mut current: Option<bool> = None;
    for (offset, _) in cell.text[chunk.clone()].char_indices() {
        let at = chunk.start + offset;
        let highlighted = cell.highlights.iter().any(|h| h.contains(&at));
        match current {
            Some(flag) if flag != highlighted => {
                out.push_str(&style(&cell.text[start..at], cell.kind, flag));
                start = at;
                current = Some(highlighted);
            }
            Some(_) => {}
            None => current = Some(highlighted),
        }
    }
    if let Some(flag) = current {
        out.push_str(&style(&cell.text[start..chunk.end], cell.kind, flag));
    }
    out
}

fn style(text: &str, kind: OpKind, highlighted: bool) -> String {
    let text = text.replace('\t', &" ".repeat(TAB_WIDTH));
    let text = text.as_str();
    let styled = match kind {
        OpKind::Equal => text.normal(),
        OpKind::Delete => text.red(),
        OpKind::Insert => text.green(),
        OpKind::Replace => text.yellow(),
    };
    if highlighted {
        styled.bold().underline().to_string()
    } else {
        styled.to_string()
    }
}
