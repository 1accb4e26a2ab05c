/*
 * cache_iterator_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Replay behavior of the cached iterator.
 */

use pretty_assertions::assert_eq;
use std::sync::Arc;
use weave_codebuffer::{CacheIterator, Part, PartIterator};

fn assert_replays(parts: Vec<Part>) {
    let parts: Vec<Arc<Part>> = parts.into_iter().map(Arc::new).collect();
    let mut it = CacheIterator::new(parts.clone());
    assert!(it.value().is_none());
    assert!(it.error().is_none());

    for (i, part) in parts.iter().enumerate() {
        assert!(it.advance(), "part {}", i);
        assert_eq!(it.value(), Some(part), "part {}", i);
    }

    assert!(!it.advance());
    assert!(it.value().is_none());
    assert!(it.error().is_none());
}

#[test]
fn test_zero_parts() {
    assert_replays(Vec::new());
}

#[test]
fn test_one_part() {
    assert_replays(vec![Part::code("Foo")]);
}

#[test]
fn test_two_parts() {
    assert_replays(vec![Part::code("Foo"), Part::code("Bar")]);
}

#[test]
fn test_replay_is_idempotent() {
    let parts: Vec<Arc<Part>> = vec![Part::text("a"), Part::code("b"), Part::text("c")]
        .into_iter()
        .map(Arc::new)
        .collect();

    let run = || {
        CacheIterator::new(parts.clone())
            .into_parts()
            .map(|p| p.unwrap())
            .collect::<Vec<_>>()
    };

    let first = run();
    let second = run();
    assert_eq!(first, parts);
    assert_eq!(first, second);
    // the same allocations are handed out every time
    assert!(first.iter().zip(&second).all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[test]
fn test_into_parts_yields_no_error() {
    let mut parts = CacheIterator::from_parts(vec![Part::text("a")]).into_parts();
    assert!(matches!(parts.next(), Some(Ok(_))));
    assert!(parts.next().is_none());
    assert!(parts.next().is_none());
}
