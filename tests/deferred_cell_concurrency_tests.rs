//! Concurrency tests for `DeferredCell`.
//!
//! These tests stress the check-and-populate step with many threads reading
//! the same cell at once.

#![cfg(feature = "control")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use idiomata::control::DeferredCell;

/// Spawns `readers` threads that wait on a barrier and then force `cell`.
fn race<T, F>(cell: &Arc<DeferredCell<T, F>>, readers: usize) -> Vec<T>
where
    T: Clone + Send + Sync + 'static,
    F: FnMut() -> T + Send + 'static,
{
    let barrier = Arc::new(Barrier::new(readers));
    let handles: Vec<_> = (0..readers)
        .map(|_| {
            let cell = Arc::clone(cell);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cell.force().clone()
            })
        })
        .collect();

    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

/// Test that concurrent initialization happens exactly once.
#[test]
fn test_concurrent_init_exactly_once() {
    for _ in 0..100 {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let cell = Arc::new(DeferredCell::new(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
            42
        }));

        let values = race(&cell, 8);

        assert!(values.iter().all(|value| *value == 42));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}

/// Test that a slow computation still runs once while readers pile up.
#[test]
fn test_slow_computation_runs_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = Arc::clone(&counter);

    let cell = Arc::new(DeferredCell::new(move || {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        String::from("slow")
    }));

    let values = race(&cell, 16);

    assert!(values.iter().all(|value| value == "slow"));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

/// Test that every reader observes the same allocation.
#[test]
fn test_readers_share_one_value() {
    let cell = Arc::new(DeferredCell::new(|| vec![1_u8; 64]));

    let addresses: Vec<usize> = {
        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cell.force().as_ptr() as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    };

    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
}

/// Test that a failure under contention leaves the cell retryable.
#[test]
fn test_failure_under_contention_is_retried() {
    for _ in 0..20 {
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = Arc::clone(&attempts);

        let cell = Arc::new(DeferredCell::fallible(move || {
            if attempts_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("first attempt fails")
            } else {
                Ok(7)
            }
        }));

        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cell.try_force().copied().ok()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Exactly one reader saw the failure; everyone else got the value.
        assert_eq!(results.iter().filter(|result| result.is_none()).count(), 1);
        assert!(results.iter().flatten().all(|value| *value == 7));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}

/// Test mixed access patterns.
///
/// Some threads force, some check get(), some check is_initialized().
#[test]
fn test_mixed_access_patterns() {
    for _ in 0..100 {
        let cell = Arc::new(DeferredCell::new(|| 42));

        let handles: Vec<_> = (0..12)
            .map(|i| {
                let c = Arc::clone(&cell);
                thread::spawn(move || match i % 3 {
                    0 => Some(*c.force()),
                    1 => c.get().copied(),
                    _ => c.is_initialized().then_some(42),
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for (i, result) in results.iter().enumerate() {
            if i % 3 == 0 {
                assert_eq!(*result, Some(42));
            } else {
                assert!(matches!(result, None | Some(42)));
            }
        }
    }
}
