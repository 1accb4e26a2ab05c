/*
 * property_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Generated-input checks of segmentation, plus a few snapshots of the
 * rendered part lists.
 */

use proptest::prelude::*;
use weave_codebuffer::{CodeBuffer, Delimiters, Part, PartIterator, PartType, Utf8Reader};

// =============================================================================
// Helpers
// =============================================================================

fn scan(input: &str, delimiters: Delimiters) -> Vec<Part> {
    let mut buffer = CodeBuffer::new(Utf8Reader::from_string(input), delimiters).unwrap();
    buffer
        .iterator()
        .unwrap()
        .into_parts()
        .map(|p| (*p.unwrap()).clone())
        .collect()
}

fn render(parts: &[Part]) -> String {
    parts
        .iter()
        .map(Part::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text that never contains a token or the trim marker.
fn gen_plain() -> impl Strategy<Value = String> {
    "[a-z ]{0,6}"
}

/// Alternating text and code segments followed by trailing text.
fn gen_segments() -> impl Strategy<Value = (Vec<(String, String)>, String)> {
    (
        prop::collection::vec((gen_plain(), gen_plain()), 0..6),
        gen_plain(),
    )
}

// =============================================================================
// Segmentation of well-formed input
// =============================================================================

proptest! {
    #[test]
    fn proptest_segments_recovered(segments in gen_segments()) {
        let (pairs, tail) = segments;
        let mut input = String::new();
        let mut expected = Vec::new();
        for (text, code) in &pairs {
            input.push_str(text);
            input.push_str("<$");
            input.push_str(code);
            input.push_str("$>");
            expected.push(Part::text(text.as_str()));
            expected.push(Part::code(code.as_str()));
        }
        input.push_str(&tail);
        expected.push(Part::text(tail.as_str()));
        expected.retain(|p| !p.is_empty());

        let parts = scan(&input, Delimiters::default());
        let joined: String = parts.iter().map(Part::as_str).collect();
        prop_assert_eq!(joined, input.replace("<$", "").replace("$>", ""));
        prop_assert_eq!(parts, expected);
    }

    #[test]
    fn proptest_input_without_tokens_is_one_text_part(input in "[a-z \n]{0,40}") {
        let parts = scan(&input, Delimiters::default());
        if input.is_empty() {
            prop_assert!(parts.is_empty());
        } else {
            prop_assert_eq!(parts, vec![Part::text(input.as_str())]);
        }
    }
}

// =============================================================================
// Arbitrary input
// =============================================================================

proptest! {
    #[test]
    fn proptest_parts_never_empty(input in "[ab<$> \\-]{0,40}") {
        for part in scan(&input, Delimiters::default()) {
            prop_assert!(!part.is_empty());
        }
    }

    #[test]
    fn proptest_without_trimming_no_content_is_invented(input in "[ab<$>]{0,40}") {
        let parts = scan(&input, Delimiters::default().with_trim_marker(None));
        let total: usize = parts.iter().map(Part::len).sum();
        prop_assert!(total <= input.len());
    }

    #[test]
    fn proptest_eager_and_lazy_scans_agree(input in "[ab<$> \\-]{0,40}") {
        let mut eager =
            CodeBuffer::new(Utf8Reader::from_string(input.as_str()), Delimiters::default())
                .unwrap();
        let count = eager.parse_all().unwrap();
        let eager_parts: Vec<Part> = eager
            .iterator()
            .unwrap()
            .into_parts()
            .map(|p| (*p.unwrap()).clone())
            .collect();

        prop_assert_eq!(count, eager_parts.len());
        prop_assert_eq!(eager.committed(), count);
        prop_assert_eq!(eager_parts, scan(&input, Delimiters::default()));
    }

    #[test]
    fn proptest_modes_alternate_without_empty_code(input in "[ab<$>]{0,40}") {
        // Text is followed by text only when an empty code part was dropped.
        prop_assume!(!input.contains("<$$>"));
        let parts = scan(&input, Delimiters::default().with_trim_marker(None));
        for pair in parts.windows(2) {
            if pair[0].part_type() == PartType::Text {
                prop_assert_eq!(pair[1].part_type(), PartType::Code);
            }
        }
    }
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn snapshot_default_delimiters() {
    let parts = scan("Hello <$- print(name) -$> !", Delimiters::default());
    insta::assert_snapshot!(render(&parts), @r#"text("Hello") code(" print(name) ") text("!")"#);
}

#[test]
fn snapshot_mustache_delimiters() {
    let parts = scan("{{{a}}} and {{b}}", Delimiters::new("{{", "}}"));
    insta::assert_snapshot!(render(&parts), @r#"text("{") code("a}") text(" and ") code("b")"#);
}
