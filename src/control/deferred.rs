//! Deferred evaluation without caching.
//!
//! [`Deferred`] holds a computation and runs it on every [`read`](Deferred::read).
//! Nothing is stored between reads, so a `Deferred` has no shared mutable
//! state and needs no synchronization.
//!
//! # Examples
//!
//! ```rust
//! use idiomata::control::Deferred;
//! use std::cell::Cell;
//!
//! let calls = Cell::new(0);
//! let deferred = Deferred::new(|| {
//!     calls.set(calls.get() + 1);
//!     42.0_f32 / 2.0
//! });
//!
//! assert_eq!(calls.get(), 0);
//! assert_eq!(deferred.read(), 21.0);
//! assert_eq!(deferred.read(), 21.0);
//! assert_eq!(calls.get(), 2);
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::{DeferredCell, LocalDeferredCell};

/// A computation whose evaluation is postponed until it is read.
///
/// Each call to [`read`](Self::read) invokes the computation again and
/// returns a fresh result. Errors produced by the computation (a `Result`
/// output or a panic) reach the caller unchanged.
///
/// Use [`cached`](Self::cached) or [`shared`](Self::shared) to turn a
/// `Deferred` into a cell that computes at most once.
///
/// # Type Parameters
///
/// * `T` - The type of the computed value
/// * `F` - The type of the computation (defaults to `fn() -> T`)
pub struct Deferred<T, F = fn() -> T> {
    computation: F,
    output: PhantomData<fn() -> T>,
}

impl<T, F: Fn() -> T> Deferred<T, F> {
    /// Wraps a computation without running it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::Deferred;
    ///
    /// let deferred = Deferred::new(|| -> i32 { panic!("never read") });
    /// drop(deferred);
    /// ```
    #[inline]
    pub const fn new(computation: F) -> Self {
        Self {
            computation,
            output: PhantomData,
        }
    }

    /// Runs the computation and returns its result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::Deferred;
    ///
    /// let deferred = Deferred::new(|| "abc".len());
    /// assert_eq!(deferred.read(), 3);
    /// ```
    #[inline]
    pub fn read(&self) -> T {
        (self.computation)()
    }

    /// Composes a transformation that is applied after every read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::Deferred;
    ///
    /// let deferred = Deferred::new(|| 21).map(|x| x * 2);
    /// assert_eq!(deferred.read(), 42);
    /// ```
    pub fn map<U, G>(self, function: G) -> Deferred<U, impl Fn() -> U>
    where
        G: Fn(T) -> U,
    {
        let computation = self.computation;
        Deferred::new(move || function(computation()))
    }

    /// Converts into a single-threaded caching cell.
    #[inline]
    pub fn cached(self) -> LocalDeferredCell<T, F> {
        LocalDeferredCell::new(self.computation)
    }

    /// Converts into a caching cell that can be shared between threads.
    #[inline]
    pub fn shared(self) -> DeferredCell<T, F> {
        DeferredCell::new(self.computation)
    }
}

impl<T: Default> Default for Deferred<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T, F> fmt::Debug for Deferred<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Deferred")
            .field(&format_args!("<deferred>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_deferred_does_not_run_on_construction() {
        let calls = Cell::new(0);
        let _deferred = Deferred::new(|| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 0);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(10)]
    fn test_deferred_runs_on_every_read(#[case] reads: usize) {
        let calls = Cell::new(0);
        let deferred = Deferred::new(|| {
            calls.set(calls.get() + 1);
            calls.get()
        });

        let results: Vec<_> = (0..reads).map(|_| deferred.read()).collect();

        assert_eq!(calls.get(), reads);
        assert_eq!(results, (1..=reads).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_deferred_map_runs_source_each_time() {
        let calls = Cell::new(0);
        let deferred = Deferred::new(|| {
            calls.set(calls.get() + 1);
            10
        })
        .map(|x| x + 1);

        assert_eq!(deferred.read(), 11);
        assert_eq!(deferred.read(), 11);
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn test_deferred_propagates_errors_unchanged() {
        let deferred = Deferred::new(|| "forty-two".parse::<i32>());
        assert!(deferred.read().is_err());
        assert!(deferred.read().is_err());
    }

    #[rstest]
    fn test_deferred_cached_stops_recomputing() {
        let calls = Cell::new(0);
        let cell = Deferred::new(|| {
            calls.set(calls.get() + 1);
            5
        })
        .cached();

        assert_eq!(*cell.force(), 5);
        assert_eq!(*cell.force(), 5);
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn test_deferred_default() {
        let deferred: Deferred<String> = Deferred::default();
        assert_eq!(deferred.read(), "");
    }

    #[rstest]
    fn test_deferred_debug_does_not_compute() {
        let deferred = Deferred::new(|| -> i32 { panic!("must not run") });
        assert_eq!(format!("{deferred:?}"), "Deferred(<deferred>)");
    }
}
