use diffcheck_engine::{Comparison, EngineConfig};
use diffcheck_render::{render_side_by_side, render_unified, Row, SideBySideOptions, UnifiedOptions};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    (prop::collection::vec("[ab ]{0,2}", 0..16), any::<bool>()).prop_map(|(lines, terminated)| {
        let mut text = lines.join("\n");
        if terminated && !lines.is_empty() {
            text.push('\n');
        }
        text
    })
}

proptest! {
    #[test]
    fn unified_is_empty_iff_identical(
        left in text(),
        right in text(),
        ignore_ws in any::<bool>(),
        context in 0usize..4,
    ) {
        let config = EngineConfig::default().with_ignore_leading_whitespace(ignore_ws);
        let cmp = Comparison::new(&left, &right, &config).unwrap();
        let options = UnifiedOptions { context, ..Default::default() };
        let out = render_unified(&cmp, &options);
        prop_assert_eq!(out.is_empty(), cmp.is_identical());
        if !out.is_empty() {
            prop_assert!(out.starts_with("--- Text 1\n+++ Text 2\n@@ -"));
            prop_assert!(out.ends_with('\n'));
        }
    }

    #[test]
    fn full_table_shows_every_line_once(left in text(), right in text()) {
        let cmp = Comparison::with_defaults(&left, &right).unwrap();
        let table = render_side_by_side(&cmp, &SideBySideOptions { context: None, intraline: true });
        let left_numbers: Vec<usize> = table.iter().filter_map(Row::left).map(|c| c.line_no).collect();
        let right_numbers: Vec<usize> = table.iter().filter_map(Row::right).map(|c| c.line_no).collect();
        prop_assert_eq!(left_numbers, (1..=cmp.left().len()).collect::<Vec<_>>());
        prop_assert_eq!(right_numbers, (1..=cmp.right().len()).collect::<Vec<_>>());
        for row in &table {
            for cell in row.left().into_iter().chain(row.right()) {
                for span in &cell.highlights {
                    prop_assert!(span.start < span.end && span.end <= cell.text.len());
                    prop_assert!(cell.text.is_char_boundary(span.start));
                }
            }
        }
    }
}
