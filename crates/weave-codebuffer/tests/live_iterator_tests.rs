/*
 * live_iterator_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Segmentation behavior of the live scanning iterator.
 */

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use weave_codebuffer::{Delimiters, LiveIterator, Part, PartIterator, PartSequence, Utf8Reader};

/// Scan `input` and check the parts one `advance` at a time, including the
/// exhausted state afterwards.
fn assert_parts(input: &str, start: &str, end: &str, expected: &[Part]) {
    let parts = PartSequence::new();
    let progress = Arc::new(AtomicUsize::new(0));
    let mut it = LiveIterator::new(
        Arc::clone(&progress),
        parts.clone(),
        Utf8Reader::from_string(input),
        &Delimiters::new(start, end),
    )
    .unwrap();
    assert!(it.value().is_none());
    assert!(it.error().is_none());

    for (i, part) in expected.iter().enumerate() {
        assert!(it.advance(), "expected part {} of {:?}", i, input);
        assert_eq!(it.value().map(|p| &**p), Some(part), "part {}", i);
        assert_eq!(progress.load(Ordering::Acquire), i + 1);
    }

    for _ in 0..2 {
        assert!(!it.advance());
        assert!(it.value().is_none());
        assert!(it.error().is_none());
    }

    assert_eq!(
        parts.snapshot().iter().map(|p| (**p).clone()).collect::<Vec<_>>(),
        expected
    );
}

#[test]
fn test_empty_input() {
    assert_parts("", "<$", "$>", &[]);
}

#[test]
fn test_text_only() {
    assert_parts("Foo Bar", "<$", "$>", &[Part::text("Foo Bar")]);
}

#[test]
fn test_text_then_code() {
    assert_parts(
        "Foo <$ Bar $>",
        "<$",
        "$>",
        &[Part::text("Foo "), Part::code(" Bar ")],
    );
}

#[test]
fn test_code_then_text() {
    assert_parts(
        "<$ Foo $> Bar",
        "<$",
        "$>",
        &[Part::code(" Foo "), Part::text(" Bar")],
    );
}

#[test]
fn test_text_code_text() {
    assert_parts(
        "Foo <$ Bar $> Baz",
        "<$",
        "$>",
        &[Part::text("Foo "), Part::code(" Bar "), Part::text(" Baz")],
    );
}

#[test]
fn test_whitespace_removal() {
    assert_parts(
        "Foo <$- Bar -$> Baz",
        "<$",
        "$>",
        &[Part::text("Foo"), Part::code(" Bar "), Part::text("Baz")],
    );
}

#[test]
fn test_only_code_part() {
    assert_parts("<$- Bar -$>", "<$", "$>", &[Part::code(" Bar ")]);
}

#[test]
fn test_open_without_close() {
    assert_parts("<$- Bar ", "<$", "$>", &[Part::code(" Bar ")]);
}

#[test]
fn test_text_then_open_without_close() {
    assert_parts(
        "Foo <$- Bar ",
        "<$",
        "$>",
        &[Part::text("Foo"), Part::code(" Bar ")],
    );
}

#[test]
fn test_no_start_sequence() {
    assert_parts("Foo Bar", "", "$>", &[Part::code("Foo Bar")]);
}

#[test]
fn test_no_end_sequence() {
    assert_parts(
        "Foo <$- Bar",
        "<$",
        "",
        &[Part::text("Foo"), Part::code(" Bar")],
    );
}

#[test]
fn test_no_start_or_end_sequence() {
    assert_parts("a <$ b $> c", "", "", &[Part::code("a <$ b $> c")]);
}

#[test]
fn test_interrupted_start_sequence() {
    assert_parts(
        "Foo <-$ Bar <$ Baz $>",
        "<$",
        "$>",
        &[Part::text("Foo <-$ Bar "), Part::code(" Baz ")],
    );
}

#[test]
fn test_interrupted_end_sequence() {
    assert_parts(
        "Foo <$ Bar $-> Baz $> Taz",
        "<$",
        "$>",
        &[
            Part::text("Foo "),
            Part::code(" Bar $-> Baz "),
            Part::text(" Taz"),
        ],
    );
}

#[test]
fn test_interrupted_start_sequence_at_eof() {
    assert_parts("Foo <", "<$", "$>", &[Part::text("Foo <")]);
}

#[test]
fn test_interrupted_end_sequence_at_eof() {
    assert_parts(
        "Foo <$ Bar $",
        "<$",
        "$>",
        &[Part::text("Foo "), Part::code(" Bar $")],
    );
}

#[test]
fn test_empty_code_part() {
    assert_parts(
        "Foo <$$> Bar",
        "<$",
        "$>",
        &[Part::text("Foo "), Part::text(" Bar")],
    );
}

#[test]
fn test_start_token_at_eof() {
    assert_parts("Foo <$", "<$", "$>", &[Part::text("Foo ")]);
}

#[test]
fn test_self_overlapping_start_token() {
    assert_parts(
        "Hello{{{World",
        "{{",
        "",
        &[Part::text("Hello{"), Part::code("World")],
    );
}

#[test]
fn test_self_overlapping_run() {
    assert_parts(
        "a{{{{b}}c",
        "{{",
        "}}",
        &[Part::text("a{{"), Part::code("b"), Part::text("c")],
    );
}

#[test]
fn test_single_character_tokens() {
    assert_parts("a%%b", "%", "%", &[Part::text("a"), Part::text("b")]);
}

#[test]
fn test_doubled_single_character_start_token() {
    assert_parts("[[x", "[", "", &[Part::code("[x")]);
}

#[test]
fn test_repeated_prefix_before_token() {
    assert_parts(
        "a<<<$b$>",
        "<$",
        "$>",
        &[Part::text("a<<"), Part::code("b")],
    );
}

#[test]
fn test_multi_character_tokens() {
    assert_parts(
        "# Title\n```go\nfmt.Println(1)\n```\nend",
        "```go",
        "```",
        &[
            Part::text("# Title\n"),
            Part::code("\nfmt.Println(1)\n"),
            Part::text("\nend"),
        ],
    );
}

#[test]
fn test_multibyte_tokens_and_content() {
    assert_parts(
        "über «x» ende",
        "«",
        "»",
        &[Part::text("über "), Part::code("x"), Part::text(" ende")],
    );
}

#[test]
fn test_multi_line_trim() {
    let input = "Hello\n<$- \nprint(\" \")\nif context.Name == \"\" { -$>\n\tUnknown\n<$- } else {\n\tprint(context.Name)\n} -$>";
    assert_parts(
        input,
        "<$",
        "$>",
        &[
            Part::text("Hello"),
            Part::code(" \nprint(\" \")\nif context.Name == \"\" { "),
            Part::text("Unknown"),
            Part::code(" } else {\n\tprint(context.Name)\n} "),
        ],
    );
}

#[test]
fn test_adjacent_code_parts() {
    assert_parts(
        "<$a$><$b$>",
        "<$",
        "$>",
        &[Part::code("a"), Part::code("b")],
    );
}
