//! Property tests for the piece extractor.

use markdown::{extract, Renderer};
use proptest::prelude::*;

/// Line prefixes that exercise every classification path.
fn prefix() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(""),
        Just("# "),
        Just("### "),
        Just("- "),
        Just("* "),
        Just("| "),
        Just("    "),
        Just("```\n"),
        Just("~~~\n"),
        Just("\n"),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn never_panics_on_arbitrary_lines(lines in prop::collection::vec(".{0,24}", 0..40)) {
        let markdown = lines.join("\n");
        let _ = extract(&markdown);
    }

    #[test]
    fn content_order_is_preserved(prefixes in prop::collection::vec(prefix(), 1..30)) {
        let markdown = prefixes
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{p}m{i}x"))
            .collect::<Vec<_>>()
            .join("\n");

        let text = Renderer::to_plain_text(&extract(&markdown));

        let mut last = 0;
        for i in 0..prefixes.len() {
            let marker = format!("m{i}x");
            let pos = text[last..].find(&marker);
            prop_assert!(pos.is_some(), "marker {} missing or out of order in {:?}", marker, text);
            last += pos.unwrap() + marker.len();
        }
    }
}
