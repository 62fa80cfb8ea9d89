#![cfg(feature = "control")]
//! Integration tests for the non-caching and caching deferred values.
//!
//! Tests cover:
//! - Deferral until first read
//! - Recompute-on-every-read vs compute-once
//! - The divide-42-by-2 scenario across all three variants

use idiomata::control::{Deferred, DeferredCell, LocalDeferredCell};
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};

#[allow(clippy::cast_precision_loss)]
fn calculate(input: i32, calls: &AtomicUsize) -> f32 {
    calls.fetch_add(1, Ordering::SeqCst);
    input as f32 / 2.0
}

// =============================================================================
// Divide-by-two Scenario
// =============================================================================

#[rstest]
fn non_caching_deferred_recomputes_on_second_read() {
    let calls = AtomicUsize::new(0);
    let value = Deferred::new(|| calculate(42, &calls));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!((value.read() - 21.0).abs() < f32::EPSILON);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!((value.read() - 21.0).abs() < f32::EPSILON);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[rstest]
fn caching_cell_keeps_counter_at_one() {
    let calls = AtomicUsize::new(0);
    let value = DeferredCell::new(|| calculate(42, &calls));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!((*value - 21.0).abs() < f32::EPSILON);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!((*value - 21.0).abs() < f32::EPSILON);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn local_caching_cell_keeps_counter_at_one() {
    let calls = AtomicUsize::new(0);
    let value = LocalDeferredCell::new(|| calculate(42, &calls));

    assert!((*value - 21.0).abs() < f32::EPSILON);
    assert!((*value - 21.0).abs() < f32::EPSILON);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Read Counts
// =============================================================================

#[rstest]
#[case(1)]
#[case(3)]
#[case(50)]
fn read_counts_match_variant(#[case] reads: usize) {
    let deferred_calls = AtomicUsize::new(0);
    let cell_calls = AtomicUsize::new(0);

    let deferred = Deferred::new(|| deferred_calls.fetch_add(1, Ordering::SeqCst));
    let cell = DeferredCell::new(|| cell_calls.fetch_add(1, Ordering::SeqCst));

    for _ in 0..reads {
        let _ = deferred.read();
        assert_eq!(*cell.force(), 0);
    }

    assert_eq!(deferred_calls.load(Ordering::SeqCst), reads);
    assert_eq!(cell_calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Conversions
// =============================================================================

#[rstest]
fn deferred_shared_converts_to_caching_cell() {
    let calls = AtomicUsize::new(0);
    let cell = Deferred::new(|| {
        calls.fetch_add(1, Ordering::SeqCst);
        "shared"
    })
    .shared();

    assert_eq!(*cell.force(), "shared");
    assert_eq!(*cell.force(), "shared");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn deferred_map_then_cache() {
    let cell = Deferred::new(|| String::from("functional"))
        .map(|text| text.to_uppercase())
        .cached();

    assert_eq!(cell.force(), "FUNCTIONAL");
}
